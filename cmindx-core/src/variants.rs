//! Landing page copy per variant and variant assignment

use rand::Rng;
use serde::Serialize;

use crate::events::VariantId;

/// Hero copy shown to visitors of one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantCopy {
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub primary_cta: &'static str,
    pub secondary_cta: &'static str,
    pub badge: &'static str,
}

const COPY_A: VariantCopy = VariantCopy {
    hero_title: "SELF-EVOLVING WEBSITE // BUILD A",
    hero_subtitle: "cMindX tracks scrolls, clicks and exits, then mutates your landing page in real time to keep the attention meter full.",
    primary_cta: "Start Optimization Run",
    secondary_cta: "View Live Telemetry",
    badge: "AGENT MODE • ANALYZE",
};

const COPY_B: VariantCopy = VariantCopy {
    hero_title: "AUTONOMOUS GROWTH AGENT // BUILD B",
    hero_subtitle: "Stop shipping static pages. cMindX treats your site like a strategy game: test, rank and evolve everything on real player data.",
    primary_cta: "Deploy Growth Agent",
    secondary_cta: "Watch Experiments",
    badge: "AGENT MODE • EVOLVE",
};

impl VariantId {
    /// Landing page copy for this variant
    pub fn copy(self) -> &'static VariantCopy {
        match self {
            Self::A => &COPY_A,
            Self::B => &COPY_B,
        }
    }

    /// Fair coin flip between A and B
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) { Self::A } else { Self::B }
    }
}

/// How a visitor is placed into a variant.
///
/// `Random` flips a coin on every activation and is not sticky across page
/// loads. Callers that persist a visitor's arm pass it back as `Fixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantAssignment {
    #[default]
    Random,
    Fixed(VariantId),
}

impl VariantAssignment {
    pub fn resolve(self) -> VariantId {
        match self {
            Self::Random => VariantId::random(),
            Self::Fixed(variant) => variant,
        }
    }
}
