use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, SimpleObject};
use floorplan_shared::config::ViewerConfig;

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlViewerConfig {
    pub title: String,
    pub image_url: String,
    pub max_markers: u32,
    pub click_slop_px: f64,
    pub fallback_height_px: f64,
}

impl From<&ViewerConfig> for GqlViewerConfig {
    fn from(c: &ViewerConfig) -> Self {
        GqlViewerConfig {
            title: c.title.clone(),
            image_url: c.image_url.clone(),
            max_markers: c.max_markers as u32,
            click_slop_px: c.click_slop_px,
            fallback_height_px: c.fallback_height_px,
        }
    }
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Settings the viewer needs before it can render.
    async fn viewer(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlViewerConfig> {
        let config = ctx.data::<Arc<ViewerConfig>>()?;
        Ok(GqlViewerConfig::from(config.as_ref()))
    }
}

pub type Schema = async_graphql::Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(config: Arc<ViewerConfig>) -> Schema {
    async_graphql::Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(config)
        .finish()
}
