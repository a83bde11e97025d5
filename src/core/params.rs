use std::fmt;

use crate::error::ParamError;

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const MOON_GRAVITY_MPS2: f64 = 1.62;
pub const MARS_GRAVITY_MPS2: f64 = 3.71;
pub const SUN_GRAVITY_MPS2: f64 = 274.0;
pub const MAX_CUSTOM_GRAVITY_MPS2: f64 = 300.0;

pub const MAX_ANGLE_DEG: f64 = 90.0;

/// Inputs of one flight. Mass never enters the vacuum kinematics; it only
/// sizes the marker and appears in the narration prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub angle_deg: f64,
    pub initial_speed_mps: f64,
    pub initial_height_m: f64,
    pub gravity_mps2: f64,
    pub mass_kg: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            initial_speed_mps: 20.0,
            initial_height_m: 0.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            mass_kg: 1.0,
        }
    }
}

impl PhysicsParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_angle(self.angle_deg)?;
        check_speed(self.initial_speed_mps)?;
        check_height(self.initial_height_m)?;
        check_gravity(self.gravity_mps2)?;
        check_mass(self.mass_kg)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GravityPreset {
    Earth,
    Moon,
    Mars,
    Sun,
    Custom,
}

impl GravityPreset {
    pub const ALL: [GravityPreset; 5] = [
        GravityPreset::Earth,
        GravityPreset::Moon,
        GravityPreset::Mars,
        GravityPreset::Sun,
        GravityPreset::Custom,
    ];

    /// Fixed acceleration for named bodies, `None` for `Custom`.
    pub fn gravity_mps2(self) -> Option<f64> {
        match self {
            GravityPreset::Earth => Some(EARTH_GRAVITY_MPS2),
            GravityPreset::Moon => Some(MOON_GRAVITY_MPS2),
            GravityPreset::Mars => Some(MARS_GRAVITY_MPS2),
            GravityPreset::Sun => Some(SUN_GRAVITY_MPS2),
            GravityPreset::Custom => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GravityPreset::Earth => "Earth",
            GravityPreset::Moon => "Moon",
            GravityPreset::Mars => "Mars",
            GravityPreset::Sun => "Sun",
            GravityPreset::Custom => "Custom",
        }
    }
}

impl fmt::Display for GravityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds the current inputs. Every setter validates and leaves the previous
/// value untouched on error.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    params: PhysicsParams,
    preset: GravityPreset,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            params: PhysicsParams::default(),
            preset: GravityPreset::Earth,
        }
    }
}

impl ParameterStore {
    pub fn new(params: PhysicsParams) -> Result<Self, ParamError> {
        params.validate()?;
        let preset = GravityPreset::ALL
            .into_iter()
            .find(|p| p.gravity_mps2() == Some(params.gravity_mps2))
            .unwrap_or(GravityPreset::Custom);
        Ok(Self { params, preset })
    }

    pub fn params(&self) -> PhysicsParams {
        self.params
    }

    pub fn preset(&self) -> GravityPreset {
        self.preset
    }

    pub fn set_angle(&mut self, angle_deg: f64) -> Result<(), ParamError> {
        check_angle(angle_deg)?;
        self.params.angle_deg = angle_deg;
        Ok(())
    }

    pub fn set_initial_speed(&mut self, speed_mps: f64) -> Result<(), ParamError> {
        check_speed(speed_mps)?;
        self.params.initial_speed_mps = speed_mps;
        Ok(())
    }

    pub fn set_initial_height(&mut self, height_m: f64) -> Result<(), ParamError> {
        check_height(height_m)?;
        self.params.initial_height_m = height_m;
        Ok(())
    }

    pub fn set_mass(&mut self, mass_kg: f64) -> Result<(), ParamError> {
        check_mass(mass_kg)?;
        self.params.mass_kg = mass_kg;
        Ok(())
    }

    /// Raw gravity value; switches the selector to `Custom`.
    pub fn set_gravity(&mut self, gravity_mps2: f64) -> Result<(), ParamError> {
        check_gravity(gravity_mps2)?;
        self.params.gravity_mps2 = gravity_mps2;
        self.preset = GravityPreset::Custom;
        Ok(())
    }

    /// `Custom` keeps the current gravity.
    pub fn select_preset(&mut self, preset: GravityPreset) {
        if let Some(g) = preset.gravity_mps2() {
            self.params.gravity_mps2 = g;
        }
        self.preset = preset;
    }

    pub fn replace(&mut self, params: PhysicsParams) -> Result<(), ParamError> {
        *self = Self::new(params)?;
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { field, value })
    }
}

fn check_angle(angle_deg: f64) -> Result<(), ParamError> {
    check_finite("angle", angle_deg)?;
    if !(0.0..=MAX_ANGLE_DEG).contains(&angle_deg) {
        return Err(ParamError::AngleOutOfRange(angle_deg));
    }
    Ok(())
}

fn check_speed(speed_mps: f64) -> Result<(), ParamError> {
    check_finite("initial speed", speed_mps)?;
    if speed_mps <= 0.0 {
        return Err(ParamError::NonPositiveSpeed(speed_mps));
    }
    Ok(())
}

fn check_height(height_m: f64) -> Result<(), ParamError> {
    check_finite("initial height", height_m)?;
    if height_m < 0.0 {
        return Err(ParamError::NegativeHeight(height_m));
    }
    Ok(())
}

fn check_gravity(gravity_mps2: f64) -> Result<(), ParamError> {
    check_finite("gravity", gravity_mps2)?;
    if gravity_mps2 <= 0.0 || gravity_mps2 > MAX_CUSTOM_GRAVITY_MPS2 {
        return Err(ParamError::GravityOutOfRange {
            value: gravity_mps2,
            max: MAX_CUSTOM_GRAVITY_MPS2,
        });
    }
    Ok(())
}

fn check_mass(mass_kg: f64) -> Result<(), ParamError> {
    check_finite("mass", mass_kg)?;
    if mass_kg <= 0.0 {
        return Err(ParamError::NonPositiveMass(mass_kg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_replace_keeps_previous_inputs() {
        let mut store = ParameterStore::default();
        store.select_preset(GravityPreset::Mars);
        store.set_angle(30.0).expect("valid angle");
        let before = store.params();

        let err = store
            .replace(PhysicsParams {
                initial_height_m: -1.0,
                ..PhysicsParams::default()
            })
            .expect_err("negative height");
        assert_eq!(err, ParamError::NegativeHeight(-1.0));
        assert_eq!(store.params(), before);
        assert_eq!(store.preset(), GravityPreset::Mars);

        store
            .replace(PhysicsParams {
                gravity_mps2: 12.0,
                ..PhysicsParams::default()
            })
            .expect("valid inputs");
        assert_eq!(store.params().gravity_mps2, 12.0);
        assert_eq!(store.preset(), GravityPreset::Custom);
    }

    #[test]
    fn presets_set_gravity() {
        let mut store = ParameterStore::default();
        store.select_preset(GravityPreset::Moon);
        assert_eq!(store.params().gravity_mps2, MOON_GRAVITY_MPS2);
        assert_eq!(store.preset(), GravityPreset::Moon);

        store.select_preset(GravityPreset::Sun);
        assert_eq!(store.params().gravity_mps2, 274.0);
    }

    #[test]
    fn custom_keeps_current_gravity() {
        let mut store = ParameterStore::default();
        store.select_preset(GravityPreset::Mars);
        store.select_preset(GravityPreset::Custom);
        assert_eq!(store.params().gravity_mps2, MARS_GRAVITY_MPS2);
        assert_eq!(store.preset(), GravityPreset::Custom);
    }

    #[test]
    fn raw_gravity_switches_to_custom() {
        let mut store = ParameterStore::default();
        store.set_gravity(42.0).expect("42 is in range");
        assert_eq!(store.preset(), GravityPreset::Custom);
        assert_eq!(store.params().gravity_mps2, 42.0);
    }

    #[test]
    fn rejected_edits_leave_previous_value() {
        let mut store = ParameterStore::default();
        let before = store.params();

        assert_eq!(
            store.set_angle(91.0),
            Err(ParamError::AngleOutOfRange(91.0))
        );
        assert!(matches!(
            store.set_gravity(0.0),
            Err(ParamError::GravityOutOfRange { .. })
        ));
        assert!(matches!(
            store.set_gravity(300.5),
            Err(ParamError::GravityOutOfRange { .. })
        ));
        assert_eq!(
            store.set_initial_height(-1.0),
            Err(ParamError::NegativeHeight(-1.0))
        );
        assert_eq!(
            store.set_initial_speed(0.0),
            Err(ParamError::NonPositiveSpeed(0.0))
        );
        assert_eq!(store.set_mass(-2.0), Err(ParamError::NonPositiveMass(-2.0)));
        assert!(matches!(
            store.set_angle(f64::NAN),
            Err(ParamError::NotFinite { field: "angle", .. })
        ));

        assert_eq!(store.params(), before);
        assert_eq!(store.preset(), GravityPreset::Earth);
    }

    #[test]
    fn boundary_values_are_accepted() {
        let mut store = ParameterStore::default();
        store.set_angle(0.0).expect("0 deg");
        store.set_angle(90.0).expect("90 deg");
        store.set_initial_height(0.0).expect("ground launch");
        store.set_gravity(300.0).expect("custom max");
    }

    #[test]
    fn new_infers_preset_from_gravity() {
        let store = ParameterStore::new(PhysicsParams {
            gravity_mps2: MOON_GRAVITY_MPS2,
            ..PhysicsParams::default()
        })
        .expect("valid params");
        assert_eq!(store.preset(), GravityPreset::Moon);

        let store = ParameterStore::new(PhysicsParams {
            gravity_mps2: 5.0,
            ..PhysicsParams::default()
        })
        .expect("valid params");
        assert_eq!(store.preset(), GravityPreset::Custom);
    }
}
