use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer, ser::SerializeMap};

/// A JSON body of the form `{"<wrapper>": payload}`.
#[derive(Debug)]
pub struct Envelope<T> {
    status: StatusCode,
    wrapper: &'static str,
    payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(wrapper: &'static str, payload: T) -> Self {
        Self::with_status(StatusCode::OK, wrapper, payload)
    }

    pub fn with_status(
        status: StatusCode,
        wrapper: &'static str,
        payload: T,
    ) -> Self {
        Self {
            status,
            wrapper,
            payload,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.wrapper, &self.payload)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
