use bytes::Bytes;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::RawResponse;

/// The declared shape of a successful response body.
pub trait Shape {
    type Output;

    fn normalize(&self, response: RawResponse) -> Result<Self::Output, ClientError>;
}

/// JSON returned as-is. A blank body yields `Value::Null`.
#[derive(Debug, Clone, Copy)]
pub struct Passthrough;

impl Shape for Passthrough {
    type Output = Value;

    fn normalize(&self, response: RawResponse) -> Result<Value, ClientError> {
        if response.is_blank() {
            return Ok(Value::Null);
        }
        response.json()
    }
}

/// A JSON object whose named field must be a list.
///
/// Anything other than a genuine array (missing field, `null`, a string, a
/// non-object body, an empty body) normalizes to an empty list. Only a body
/// that is not JSON at all is an error.
#[derive(Debug, Clone, Copy)]
pub struct ArrayField(pub &'static str);

impl Shape for ArrayField {
    type Output = Vec<Value>;

    fn normalize(&self, response: RawResponse) -> Result<Vec<Value>, ClientError> {
        let mut body = Passthrough.normalize(response)?;
        Ok(take_array(&mut body, self.0))
    }
}

/// Raw bytes, no decoding attempted.
#[derive(Debug, Clone, Copy)]
pub struct Binary;

impl Shape for Binary {
    type Output = Bytes;

    fn normalize(&self, response: RawResponse) -> Result<Bytes, ClientError> {
        Ok(response.into_bytes())
    }
}

/// Success is all that matters; the body is ignored.
#[derive(Debug, Clone, Copy)]
pub struct Discard;

impl Shape for Discard {
    type Output = ();

    fn normalize(&self, _response: RawResponse) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Remove `field` from a JSON object, keeping it only if it is an array.
pub fn take_array(body: &mut Value, field: &str) -> Vec<Value> {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
