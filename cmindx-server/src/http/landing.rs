//! Landing page

use axum::{extract::Query, response::Html};
use cmindx_core::VariantId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    /// Force a variant instead of flipping a coin
    pub variant: Option<String>,
}

/// GET / - render the landing page for one variant.
///
/// Unknown or missing `?variant=` falls back to a fresh coin flip.
pub async fn landing(Query(query): Query<LandingQuery>) -> Html<String> {
    let variant = query
        .variant
        .as_deref()
        .and_then(VariantId::parse)
        .unwrap_or_else(VariantId::random);
    Html(render_landing(variant))
}

pub fn render_landing(variant: VariantId) -> String {
    let copy = variant.copy();
    format!(
        r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>cMindX - Self-Evolving Website Agent</title>
<meta name="description" content="cMindX is an AI-powered agent that observes user behaviour, runs experiments and evolves your website content and layout automatically.">
</head>
<body data-variant="{variant}">
<header>
<span>cMindX // WebMind Agent</span>
<span>MODE: LIVE TRAFFIC</span>
<span>VARIANT: {variant}</span>
</header>
<main>
<p class="badge">{badge}</p>
<h1>{title}</h1>
<p>{subtitle}</p>
<a class="cta-primary" href="#start">{primary}</a>
<a class="cta-secondary" href="/events">{secondary}</a>
</main>
</body>
</html>
"##,
        variant = variant,
        badge = copy.badge,
        title = copy.hero_title,
        subtitle = copy.hero_subtitle,
        primary = copy.primary_cta,
        secondary = copy.secondary_cta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    #[test]
    fn render_includes_variant_copy() {
        let html = render_landing(VariantId::B);
        assert!(html.contains("AUTONOMOUS GROWTH AGENT // BUILD B"));
        assert!(html.contains(r#"data-variant="B""#));
        assert!(html.contains(r##"<a class="cta-primary" href="#start">Deploy Growth Agent</a>"##));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn query_selects_variant() {
        let server = TestServer::new(Router::new().route("/", get(landing))).unwrap();

        let response = server.get("/").add_query_param("variant", "A").await;
        response.assert_status_ok();
        assert!(response.text().contains("SELF-EVOLVING WEBSITE // BUILD A"));
    }

    #[tokio::test]
    async fn unknown_variant_still_renders() {
        let server = TestServer::new(Router::new().route("/", get(landing))).unwrap();

        let text = server.get("/?variant=Z").await.text();
        assert!(text.contains("BUILD A") || text.contains("BUILD B"));
    }
}
