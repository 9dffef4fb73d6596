use floorplan_shared::config::ViewerConfig;
use serde::{Deserialize, Serialize};

pub const VIEWER_QUERY: &str =
    "query { viewer { title imageUrl maxMarkers clickSlopPx fallbackHeightPx } }";

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| "no location origin".to_string())?;
    Ok(format!("{}/graphql", origin))
}

/// Unwrap a GraphQL envelope, preferring the first reported error.
fn into_data<T>(resp: GraphQLResponse<T>) -> Result<T, String> {
    if let Some(errors) = resp.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.message);
        }
    }
    resp.data.ok_or_else(|| "No data returned".to_string())
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url()?)
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;
    into_data(gql_resp)
}

#[derive(Deserialize)]
pub struct ViewerResponse {
    pub viewer: ViewerConfig,
}

pub async fn fetch_viewer_config() -> Result<ViewerConfig, String> {
    let resp: ViewerResponse = query(VIEWER_QUERY, None).await?;
    Ok(resp.viewer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_request_omits_null_variables() {
        let req = GraphQLRequest {
            query: VIEWER_QUERY.to_string(),
            variables: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["query"], VIEWER_QUERY);
        assert!(json.get("variables").is_none());
    }

    #[test]
    fn test_viewer_response_deserializes() {
        let json = r#"{"data":{"viewer":{"title":"Office","imageUrl":"/static/office.png","maxMarkers":5,"clickSlopPx":4.0,"fallbackHeightPx":320.0}}}"#;
        let resp: GraphQLResponse<ViewerResponse> = serde_json::from_str(json).unwrap();
        let config = into_data(resp).unwrap().viewer;
        assert_eq!(config.title, "Office");
        assert_eq!(config.image_url, "/static/office.png");
        assert_eq!(config.max_markers, 5);
        assert_eq!(config.click_slop_px, 4.0);
        assert_eq!(config.fallback_height_px, 320.0);
    }

    #[test]
    fn test_viewer_response_missing_fields_use_defaults() {
        let json = r#"{"data":{"viewer":{"title":"Office"}}}"#;
        let resp: GraphQLResponse<ViewerResponse> = serde_json::from_str(json).unwrap();
        let config = into_data(resp).unwrap().viewer;
        assert_eq!(config.max_markers, ViewerConfig::default().max_markers);
    }

    #[test]
    fn test_graphql_error_response() {
        let json = r#"{"data":null,"errors":[{"message":"Unknown field \"markers\""}]}"#;
        let resp: GraphQLResponse<ViewerResponse> = serde_json::from_str(json).unwrap();
        let err = into_data(resp).err().unwrap();
        assert_eq!(err, "Unknown field \"markers\"");
    }

    #[test]
    fn test_empty_response_is_error() {
        let resp: GraphQLResponse<ViewerResponse> =
            serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert_eq!(into_data(resp).err().unwrap(), "No data returned");
    }
}
