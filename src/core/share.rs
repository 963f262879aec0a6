use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use url::Url;

use crate::core::params::RenderConfig;
use crate::core::renderer::{SVG_CONTENT_TYPE, render_markup};

/// Everything needed to embed a configured bar elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub url: String,
    pub markdown: String,
    pub html: String,
    pub data_uri: String,
}

/// Builds the link for `config` against the public bar endpoint `public_url`.
/// Any query string already on `public_url` is replaced.
pub fn build_share_link(public_url: &str, config: &RenderConfig) -> Result<ShareLink> {
    let mut url = Url::parse(public_url)
        .with_context(|| format!("invalid public bar url: {public_url}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("public bar url must be hierarchical: {public_url}");
    }
    url.set_query(None);
    url.query_pairs_mut()
        .extend_pairs(config.to_query_pairs());
    let url = url.to_string();

    let data_uri = format!(
        "data:{};base64,{}",
        SVG_CONTENT_TYPE,
        general_purpose::STANDARD.encode(render_markup(config))
    );

    Ok(ShareLink {
        markdown: format!("![Progress Bar]({url})"),
        html: format!(r#"<img src="{url}" alt="Progress Bar">"#),
        url,
        data_uri,
    })
}
