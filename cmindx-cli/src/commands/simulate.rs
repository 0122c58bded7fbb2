//! Simulate command: synthetic visitors for demos and smoke tests.
//!
//! Each visitor activates a capture hook, scrolls down the page in a few
//! steps, maybe clicks a call to action and leaves. Events go through the
//! same HTTP transport a real landing page would use.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use cmindx_capture::{CaptureConfig, CaptureHook, ClickInput, HttpTransport, ScrollMetrics, Transport};
use cmindx_core::{VariantAssignment, VariantId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::ConfigLoader;

const PAGE_HEIGHT: f64 = 3000.0;
const VIEWPORT_HEIGHT: f64 = 800.0;
const MAX_SCROLL_STEPS: usize = 5;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of visitors to simulate
    #[arg(short = 'n', long, default_value_t = 20)]
    pub visitors: usize,

    /// Server base URL (defaults to the configured server)
    #[arg(long)]
    pub url: Option<String>,

    /// Put every visitor on one variant instead of flipping a coin
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<VariantId>,

    /// Extra scroll depth (percentage points) given to variant B visitors
    #[arg(long, default_value_t = 10.0)]
    pub lift: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_variant(s: &str) -> Result<VariantId, String> {
    VariantId::parse(&s.to_ascii_uppercase()).ok_or_else(|| format!("unknown variant '{}'", s))
}

/// What one synthetic visitor will do
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorPlan {
    pub variant: VariantId,
    /// Increasing scroll depths, each in 0..=100
    pub scroll_depths: Vec<u8>,
    pub clicks: Vec<ClickInput>,
}

/// Draw a visitor plan from `rng`
pub fn plan_visitor<R: Rng>(rng: &mut R, fixed: Option<VariantId>, lift: f64) -> VisitorPlan {
    let variant = fixed.unwrap_or_else(|| VariantId::random_with(rng));
    let bonus = if variant == VariantId::B { lift } else { 0.0 };
    let max_depth = (rng.gen_range(10.0..90.0) + bonus).clamp(0.0, 100.0);

    let steps = rng.gen_range(1..=MAX_SCROLL_STEPS);
    let scroll_depths = (1..=steps)
        .map(|step| (max_depth * step as f64 / steps as f64).round() as u8)
        .collect();

    let copy = variant.copy();
    let mut clicks = Vec::new();
    if rng.gen_bool(0.4) {
        clicks.push(ClickInput {
            x: rng.gen_range(200.0..600.0),
            y: rng.gen_range(300.0..500.0),
            tag: "A".into(),
            text: Some(copy.primary_cta.to_string()),
        });
    }
    if rng.gen_bool(0.15) {
        clicks.push(ClickInput {
            x: rng.gen_range(200.0..600.0),
            y: rng.gen_range(300.0..500.0),
            tag: "A".into(),
            text: Some(copy.secondary_cta.to_string()),
        });
    }

    VisitorPlan {
        variant,
        scroll_depths,
        clicks,
    }
}

fn metrics_for(depth: u8) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: (PAGE_HEIGHT - VIEWPORT_HEIGHT) * f64::from(depth) / 100.0,
        scroll_height: PAGE_HEIGHT,
        client_height: VIEWPORT_HEIGHT,
    }
}

/// Play one visitor through a capture hook and wait for delivery
pub async fn run_visitor(transport: Arc<dyn Transport>, plan: &VisitorPlan) {
    let hook = CaptureHook::activate(
        transport,
        CaptureConfig {
            assignment: VariantAssignment::Fixed(plan.variant),
            ..Default::default()
        },
    );
    debug!(session_id = hook.session_id(), variant = %plan.variant, "visitor arrived");

    for depth in &plan.scroll_depths {
        hook.scroll(metrics_for(*depth));
    }
    for click in &plan.clicks {
        hook.click(click.clone());
    }

    hook.detach().await;
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let url = args.url.clone().unwrap_or_else(|| config.server_url());
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_timeout(&url, config.timeout())?);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(visitors = args.visitors, "Simulating traffic against {}", url);

    let mut per_variant = [0usize; 2];
    for _ in 0..args.visitors {
        let plan = plan_visitor(&mut rng, args.variant, args.lift);
        per_variant[match plan.variant {
            VariantId::A => 0,
            VariantId::B => 1,
        }] += 1;
        run_visitor(Arc::clone(&transport), &plan).await;
    }

    println!(
        "Simulated {} visitors (A: {}, B: {}) against {}",
        args.visitors, per_variant[0], per_variant[1], url
    );
    Ok(())
}
