use std::sync::Arc;

use axum::{
    extract::State as AxumState,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::state::State;

/// Single GraphQL endpoint. A missing token lets the request through so
/// `login` can run; a token that fails verification is rejected here with a
/// uniform 401 before any resolver executes.
pub async fn graphql_handler(
    AxumState(state): AxumState<Arc<State>>,
    headers: HeaderMap,
    Json(request): Json<async_graphql::Request>,
) -> Response {
    let request = match bearer_token(&headers) {
        Some(token) => match state.tokens.verify(token) {
            Ok(claims) => request.data(claims),
            Err(_) => {
                return (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response()
            }
        },
        None => request,
    };

    Json(state.schema.execute(request).await).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

    use super::bearer_token;

    #[test]
    fn bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
