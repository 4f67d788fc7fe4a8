//! Aircraft-level performance figures derived from a polar, and export
//! to the three-point WinPilot polar format.
//!
//! The polar of a glider is measured at a reference mass of the empty
//! aircraft plus a standard pilot. Queries at other masses rescale it.
//!
//! References
//! * http://www.winpilot.com/polar.asp
use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Point, Polar, PolarError};

/// Standard pilot mass used for the reference mass (kg)
pub const PILOT_MASS: f64 = 80.0;

/// Lightest pilot considered for the minimum wing loading (kg)
pub const PILOT_MASS_MIN: f64 = 70.0;

/// A glider type and its polar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Glider {
    pub name: String,
    /// Empty mass (kg)
    pub mass_empty: f64,
    /// Maximum take-off mass (kg)
    pub mass_max: f64,
    /// Wing area (m^2)
    pub wing_area: f64,
    /// Wing span (m)
    pub wing_span: f64,
    /// Fuselage length (m)
    pub length: f64,
    /// Manoeuvring speed (km/h), zero if not published
    pub speed_maneuvering: f64,
    /// Never-exceed speed (km/h)
    pub speed_max: f64,
    /// Water ballast capacity (litres)
    pub water_ballast: f64,
    /// DAeC competition handicap index
    pub daec_index: i32,
    /// Polar at the reference mass
    pub polar: Polar,
}

impl Glider {
    /// Mass at which the polar was measured (kg).
    pub fn mass_reference(&self) -> f64 {
        self.mass_empty + PILOT_MASS
    }

    /// Wing loading with the lightest pilot and no ballast (kg/m^2).
    pub fn wing_loading_min(&self) -> f64 {
        (self.mass_empty + PILOT_MASS_MIN) / self.wing_area
    }

    /// Wing loading at maximum take-off mass (kg/m^2).
    pub fn wing_loading_max(&self) -> f64 {
        self.mass_max / self.wing_area
    }

    /// Minimum speed (km/h).
    pub fn speed_min(&self) -> f64 {
        self.polar.minimum_speed().speed
    }

    /// Minimum sink rate (m/s).
    pub fn sink_min(&self) -> Result<f64, PolarError> {
        Ok(self.polar.minimum_sink()?.sink)
    }

    /// Best glide speed (km/h).
    pub fn speed_best_glide(&self) -> Result<f64, PolarError> {
        Ok(self.polar.best_glide()?.speed)
    }

    /// Best glide ratio in still air.
    pub fn glide_ratio_best(&self) -> Result<f64, PolarError> {
        Ok(self.polar.best_glide()?.glide_ratio_still_air())
    }

    /// The polar rescaled to a flying mass (kg).
    pub fn polar_at_mass(&self, mass: f64) -> Result<Polar, PolarError> {
        self.polar.shift(self.mass_reference(), mass)
    }

    /// Three-point WinPilot polar at `mass`, or at the reference mass.
    ///
    /// The points are minimum sink, the highest usable speed (the lower of
    /// Vne and the end of the curve), and the speed half way between them.
    pub fn win_polar(&self, mass: Option<f64>) -> Result<WinPilotPolar, PolarError> {
        let (mass, polar) = match mass {
            None => (self.mass_reference(), self.polar.clone()),
            Some(m) => (m, self.polar_at_mass(m)?),
        };

        let speed3 = self.speed_max.min(polar.maximum_speed().speed);
        let p1 = polar.minimum_sink()?;
        let p3 = polar.value_at_speed(speed3)?;
        let p2 = polar.value_at_speed((p1.speed + p3.speed) / 2.0)?;

        Ok(WinPilotPolar {
            name: self.name.clone(),
            mass,
            water_ballast: self.water_ballast,
            points: [p1, p2, p3],
        })
    }
}

impl fmt::Display for Glider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A polar reduced to three points, as read by WinPilot and most
/// flight computers.
#[derive(Clone, Debug, PartialEq)]
pub struct WinPilotPolar {
    pub name: String,
    /// Dry gross mass (kg)
    pub mass: f64,
    /// Maximum water ballast (litres)
    pub water_ballast: f64,
    pub points: [Point; 3],
}

#[cfg(feature = "std")]
impl WinPilotPolar {
    /// Write the polar file contents.
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<(), PolarError> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for WinPilotPolar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [p1, p2, p3] = &self.points;
        writeln!(
            f,
            "*{} WinPilot POLAR file: Created by {} {}",
            self.name,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            f,
            "*MassDryGross[kg], MaxWaterBallast[liters], Speed1[km/h], Sink1[m/s], Speed2, Sink2, Speed3, Sink3"
        )?;
        write!(
            f,
            "{}, {}, {:.2}, {:.2}, {:.2}, {:.2}, {:.2}, {:.2}",
            self.mass, self.water_ballast, p1.speed, p1.sink, p2.speed, p2.sink, p3.speed, p3.sink
        )
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::*;
    use crate::testing::*;

    fn two_seater() -> Glider {
        Glider {
            name: "Reference Two-Seater".into(),
            mass_empty: 360.0,
            mass_max: 600.0,
            wing_area: 17.95,
            wing_span: 20.0,
            length: 8.73,
            speed_maneuvering: 180.0,
            speed_max: 280.0,
            water_ballast: 0.0,
            daec_index: 110,
            polar: reference_polar(),
        }
    }

    #[test]
    fn test_derived_figures() {
        let g = two_seater();
        assert_eq!(g.to_string(), "Reference Two-Seater");
        assert_eq!(g.mass_reference(), 440.0);
        // Aspect ratio from the published dimensions
        assert!((g.wing_span * g.wing_span / g.wing_area - 22.28).abs() < 0.01);
        assert!((g.wing_loading_min() - 24.0).abs() < 0.05);
        assert!((g.wing_loading_max() - 33.4).abs() < 0.05);
        assert_eq!(g.speed_min(), 60.0);
        assert!((g.sink_min().unwrap() + 0.6).abs() < 1e-6);
        assert!((g.speed_best_glide().unwrap() - 80.0).abs() < 0.1);
        assert!((g.glide_ratio_best().unwrap() - 34.72).abs() < 0.05);
    }

    #[test]
    fn test_polar_at_mass() {
        let g = two_seater();
        assert_eq!(g.polar_at_mass(440.0).unwrap(), g.polar);

        let heavy = g.polar_at_mass(g.mass_max).unwrap();
        let best = heavy.best_glide().unwrap();
        assert!((best.speed - 93.4).abs() < 0.1);
        assert!((best.glide_ratio_still_air() - g.glide_ratio_best().unwrap()).abs() < 0.05);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let g = two_seater();
        let json = serde_json::to_string_pretty(&g).unwrap();
        let back: Glider = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.wing_span, 20.0);
        assert_eq!(back.length, 8.73);
        assert_eq!(back.speed_maneuvering, 180.0);
        assert_eq!(back.daec_index, 110);
        assert_eq!(back.mass_reference(), 440.0);
        assert_eq!(back.glide_ratio_best().unwrap(), g.glide_ratio_best().unwrap());
    }

    #[test]
    fn test_win_polar() {
        let g = two_seater();
        let wp = g.win_polar(None).unwrap();
        assert_eq!(wp.mass, 440.0);

        let text = wp.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("*Reference Two-Seater WinPilot POLAR file: Created by glide-polar"));
        assert!(lines[1].starts_with("*MassDryGross[kg]"));

        // Vne is beyond the end of the curve, so the curve end is used
        let fields: Vec<&str> = lines[2].split(", ").collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(&fields[..4], &["440", "0", "70.00", "-0.60"]);
        assert_eq!(&fields[6..], &["199.97", "-7.36"]);

        let speed2: f64 = fields[4].parse().unwrap();
        assert!((speed2 - (70.0 + 199.97) / 2.0).abs() < 0.05);
        let sink2: f64 = fields[5].parse().unwrap();
        assert!((sink2 - reference_sink(speed2)).abs() < 0.011);
    }

    #[test]
    fn test_win_polar_limited_by_vne() {
        let mut g = two_seater();
        g.speed_max = 150.0;
        let wp = g.win_polar(Some(600.0)).unwrap();
        assert_eq!(wp.mass, 600.0);

        let [p1, _, p3] = wp.points;
        assert!((p3.speed - 150.0).abs() < 0.05);
        let multiplier = (600.0_f64 / 440.0).sqrt();
        assert!((p1.speed - 70.0 * multiplier).abs() < 0.05);

        let mut out = Vec::new();
        wp.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(2).unwrap().starts_with("600, 0, "));
    }
}
