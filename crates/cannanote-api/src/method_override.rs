// HTTP method override for HTML forms
// Decision: Only POST can be overridden, and only to PUT, PATCH or DELETE
//
// Browsers submit forms as GET or POST. A form that means PUT or DELETE
// posts to `...?_method=PUT`; this rewrite runs before routing so the
// router sees the intended method.

use axum::{
    extract::{Query, Request},
    http::Method,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite `POST ?_method=X` into method X
pub fn rewrite(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }

    let Ok(Query(query)) = Query::<OverrideQuery>::try_from_uri(req.uri()) else {
        return req;
    };
    let Some(requested) = query.method else {
        return req;
    };

    let method = match requested.to_ascii_uppercase().as_str() {
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        _ => return req,
    };

    tracing::trace!(uri = %req.uri(), %method, "Method override");
    *req.method_mut() = method;
    req
}
