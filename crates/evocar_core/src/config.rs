//! Configuration for the physics world, track and vehicle builder.
//!
//! Every constant that influences a fitness value lives here so that a run
//! can be reproduced from its configuration alone. All sections fall back to
//! their defaults when omitted from the TOML file.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! gravity_y = -10.0
//!
//! [step]
//! dt = 0.016666668
//! velocity_iterations = 6
//! position_iterations = 2
//!
//! [track]
//! seed = 1
//! attached_points = 100
//!
//! [vehicle]
//! drive_speed = 5.0
//! ```

use evocar_data::{Material, Vec2};
use serde::{Deserialize, Serialize};

/// Global world parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity_x: f32,
    pub gravity_y: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: -10.0,
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity_x, self.gravity_y)
    }
}

/// Fixed timestep and solver iteration counts.
///
/// These must not change during a run: the world rejects a step whose
/// parameters differ from the first one it executed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StepParams {
    pub dt: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            velocity_iterations: 6,
            position_iterations: 2,
        }
    }
}

impl StepParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "Timestep must be positive and finite"
        );
        anyhow::ensure!(
            self.velocity_iterations > 0,
            "Velocity iterations must be positive"
        );
        anyhow::ensure!(
            self.position_iterations > 0,
            "Position iterations must be positive"
        );
        Ok(())
    }
}

/// Terrain profile generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    /// Seed of the elevation generator. Changing it invalidates fitness
    /// comparisons against earlier generations.
    pub seed: u64,
    /// Points generated by the profile.
    pub generated_points: usize,
    /// Prefix of the profile attached to the chain fixture.
    pub attached_points: usize,
    /// Leading points held at zero elevation as a spawn margin.
    pub flat_points: usize,
    pub x_origin: f32,
    pub x_step: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    /// World position of the static body carrying the chain.
    pub anchor: Vec2,
    pub material: Material,
    pub collision_group: i32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            generated_points: 500,
            attached_points: 100,
            flat_points: 8,
            x_origin: -150.0,
            x_step: 40.0,
            min_elevation: -15.0,
            max_elevation: 15.0,
            anchor: Vec2::new(-80.0, 0.0),
            material: Material::new(1.0, 0.3, 0.3),
            collision_group: 0,
        }
    }
}

/// Vehicle assembly constants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VehicleConfig {
    pub chassis_material: Material,
    /// Half width and half height of the axle box.
    pub axle_half_extents: Vec2,
    pub axle_material: Material,
    pub wheel_material: Material,
    /// Shared by every fixture of the vehicle; must be negative.
    pub collision_group: i32,
    /// Target angular speed of the wheel motors (rad/s).
    pub drive_speed: f32,
    pub drive_max_torque: f32,
    /// Suspension axis in the chassis frame.
    pub suspension_axis: Vec2,
    pub suspension_lower: f32,
    pub suspension_upper: f32,
    pub suspension_motor_speed: f32,
    pub suspension_motor_max_force: f32,
    /// Fan triangles with a smaller area are rejected as degenerate.
    pub min_triangle_area: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            chassis_material: Material::new(1.0, 0.3, 0.3),
            axle_half_extents: Vec2::new(1.0, 1.0),
            axle_material: Material::new(0.5, 3.0, 0.3),
            wheel_material: Material::new(1.0, 0.3, 0.3),
            collision_group: -2,
            drive_speed: 5.0,
            drive_max_torque: 1500.0,
            suspension_axis: Vec2::new(0.0, 1.0),
            suspension_lower: -1.0,
            suspension_upper: 1.0,
            suspension_motor_speed: 0.0,
            suspension_motor_max_force: 0.0,
            min_triangle_area: 1e-6,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Ticks between periodic summary log lines; 0 disables them.
    pub log_interval: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { log_interval: 600 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub step: StepParams,
    pub track: TrackConfig,
    pub vehicle: VehicleConfig,
    pub metrics: MetricsConfig,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.gravity().is_finite(),
            "Gravity must be finite"
        );

        self.step.validate()?;

        // Track validation
        let track = &self.track;
        anyhow::ensure!(
            track.generated_points >= 2,
            "Track must generate at least 2 points"
        );
        anyhow::ensure!(
            track.attached_points >= 2,
            "Track must attach at least 2 points"
        );
        anyhow::ensure!(
            track.attached_points <= track.generated_points,
            "Attached track prefix cannot exceed generated points"
        );
        anyhow::ensure!(
            track.x_step.is_finite() && track.x_step > 0.0,
            "Track x step must be positive"
        );
        anyhow::ensure!(
            track.min_elevation.is_finite()
                && track.max_elevation.is_finite()
                && track.min_elevation < track.max_elevation,
            "Track elevation range must be finite and non-empty"
        );
        anyhow::ensure!(
            track.anchor.is_finite() && track.x_origin.is_finite(),
            "Track anchor must be finite"
        );
        anyhow::ensure!(track.material.is_valid(), "Track material is invalid");

        // Vehicle validation
        let vehicle = &self.vehicle;
        anyhow::ensure!(
            vehicle.collision_group < 0,
            "Vehicle collision group must be negative"
        );
        anyhow::ensure!(
            vehicle.collision_group != track.collision_group,
            "Vehicle and track must use different collision groups"
        );
        anyhow::ensure!(
            vehicle.chassis_material.is_valid()
                && vehicle.axle_material.is_valid()
                && vehicle.wheel_material.is_valid(),
            "Vehicle materials must be non-negative and finite"
        );
        anyhow::ensure!(
            vehicle.axle_half_extents.is_finite()
                && vehicle.axle_half_extents.x > 0.0
                && vehicle.axle_half_extents.y > 0.0,
            "Axle half extents must be positive"
        );
        anyhow::ensure!(
            vehicle.drive_speed.is_finite(),
            "Drive speed must be finite"
        );
        anyhow::ensure!(
            vehicle.drive_max_torque.is_finite() && vehicle.drive_max_torque >= 0.0,
            "Drive torque must be non-negative"
        );
        anyhow::ensure!(
            vehicle.suspension_axis.is_finite() && vehicle.suspension_axis.length() > 0.0,
            "Suspension axis must be a non-zero vector"
        );
        anyhow::ensure!(
            vehicle.suspension_lower.is_finite()
                && vehicle.suspension_upper.is_finite()
                && vehicle.suspension_lower <= vehicle.suspension_upper,
            "Suspension limits must be finite and ordered"
        );
        anyhow::ensure!(
            vehicle.suspension_motor_speed.is_finite()
                && vehicle.suspension_motor_max_force.is_finite()
                && vehicle.suspension_motor_max_force >= 0.0,
            "Suspension motor must be finite with non-negative force"
        );
        anyhow::ensure!(
            vehicle.min_triangle_area.is_finite() && vehicle.min_triangle_area >= 0.0,
            "Minimum triangle area must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hex SHA-256 over every physics-relevant section.
    ///
    /// Fitness values are only comparable between runs with equal fingerprints.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.step).as_bytes());
        hasher.update(format!("{:?}", self.track).as_bytes());
        hasher.update(format!("{:?}", self.vehicle).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timestep_rejected() {
        let config = SimConfig {
            step: StepParams {
                dt: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimConfig {
            step: StepParams {
                velocity_iterations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_negative_vehicle_group_rejected() {
        let config = SimConfig {
            vehicle: VehicleConfig {
                collision_group: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_track_prefix_longer_than_profile_rejected() {
        let config = SimConfig {
            track: TrackConfig {
                generated_points: 50,
                attached_points: 100,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml(
            r#"
            [track]
            attached_points = 40

            [vehicle]
            drive_speed = 7.5
            "#,
        )
        .unwrap();
        assert_eq!(config.track.attached_points, 40);
        assert_eq!(config.track.generated_points, 500);
        assert_eq!(config.vehicle.drive_speed, 7.5);
        assert_eq!(config.step, StepParams::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(SimConfig::from_toml("[step]\ndt = -1.0\n").is_err());
        assert!(SimConfig::from_toml("[step\n").is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = SimConfig::default();
        let config2 = SimConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut config3 = SimConfig::default();
        config3.track.seed = 2;
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_logging() {
        let mut config = SimConfig::default();
        config.metrics.log_interval = 1;
        assert_eq!(config.fingerprint(), SimConfig::default().fingerprint());
    }
}
