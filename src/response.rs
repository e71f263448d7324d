use axum::Json;
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Serialize)]
pub enum SuccessResult {
    #[serde(rename = "success")]
    Success,
}

#[derive(Debug, Serialize)]
pub enum ErrorResult {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Serialize)]
pub enum EmptyMsg {
    #[serde(rename = "")]
    Empty,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InternalError,
    StorageError,
}

#[derive(Debug, Serialize)]
pub struct JsonSuccess<T> {
    result: SuccessResult,
    msg: EmptyMsg,
    #[serde(flatten)]
    inner: T,
}

#[derive(Debug, Serialize)]
pub struct JsonError<'a> {
    result: ErrorResult,
    msg: Cow<'a, str>,
    code: ErrorCode,
}

pub fn json_success<T>(inner: T) -> Json<JsonSuccess<T>> {
    Json(JsonSuccess {
        result: SuccessResult::Success,
        msg: EmptyMsg::Empty,
        inner,
    })
}

pub fn json_error_code<'a>(
    message: impl Into<Cow<'a, str>>,
    code: ErrorCode,
) -> Json<JsonError<'a>> {
    Json(JsonError {
        result: ErrorResult::Error,
        msg: message.into(),
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_flattens_inner() {
        #[derive(Serialize)]
        struct Inner {
            value: u32,
        }
        let Json(body) = json_success(Inner { value: 7 });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"result": "success", "msg": "", "value": 7})
        );
    }

    #[test]
    fn error_envelope() {
        let Json(body) = json_error_code("boom", ErrorCode::InternalError);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"result": "error", "msg": "boom", "code": "INTERNAL_ERROR"})
        );

        let Json(body) = json_error_code(String::from("disk gone"), ErrorCode::StorageError);
        assert_eq!(
            serde_json::to_value(body).unwrap()["code"],
            json!("STORAGE_ERROR")
        );
    }
}
