mod client;
mod panel;

pub use client::{GeminiClient, NarrationConfig};
pub use panel::{NarrationPanel, NarrationStatus};

use crate::core::params::PhysicsParams;
use crate::error::NarrationError;

/// Anything that turns a prompt into text. Implemented by the HTTP client and
/// by test doubles.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, NarrationError>;
}

pub fn build_prompt(params: &PhysicsParams) -> String {
    format!(
        "You are a physics tutor. A projectile is launched in a vacuum with:\n\
         - launch angle: {:.1} degrees\n\
         - initial speed: {:.2} m/s\n\
         - initial height: {:.2} m\n\
         - gravitational acceleration: {:.2} m/s^2\n\
         - mass: {:.2} kg\n\
         In at most 150 words, explain the shape of the trajectory, the time of \
         flight, the maximum height and the range for these values. Say \
         explicitly whether the mass affects the trajectory when there is no \
         air resistance.",
        params.angle_deg,
        params.initial_speed_mps,
        params.initial_height_m,
        params.gravity_mps2,
        params.mass_kg,
    )
}

/// Blocking request, for hosts without a frame loop.
pub fn request_narration(
    generator: &dyn TextGenerator,
    params: &PhysicsParams,
) -> Result<String, NarrationError> {
    generator.generate(&build_prompt(params))
}
