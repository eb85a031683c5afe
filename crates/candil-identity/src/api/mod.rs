//! Wire shapes of the identity service's credential endpoints.

mod request;
mod response;

pub(crate) use request::CredentialsRequestPayload;
pub(crate) use response::{IdentityErrorResponse, SessionApiResponse};
