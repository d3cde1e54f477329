use axum::{
    http::{HeaderMap, Method, Uri},
    response::Response,
};

use crate::web::{log, REQUEST_ID_HEADER};

pub async fn response_mapper(
    req_method: Method,
    uri: Uri,
    headers: HeaderMap,
    resp: Response,
) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(str::to_string);

    log::log_request(request_id, &req_method, &uri, resp.status());

    resp
}
