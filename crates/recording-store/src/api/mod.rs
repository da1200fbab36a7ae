mod api_error;
mod api_state;
mod handlers;
mod message_response;
mod record_request;
mod router;

pub(crate) use {
    api_error::ApiError, api_state::ApiState, message_response::MessageResponse,
    record_request::RecordRequest, router::build_router,
};
