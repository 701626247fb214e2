// tb-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, DynamicViscosity as UomDynamicViscosity,
    Force as UomForce, Length as UomLength, MassDensity as UomMassDensity,
    Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type AngVel = UomAngularVelocity;
pub type DynVisc = UomDynamicViscosity;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngVel {
    use uom::si::angular_velocity::revolution_per_minute;
    AngVel::new::<revolution_per_minute>(v)
}

/// Rotational speed in rad/s from an rpm value; the solver core works in rad/s.
#[inline]
pub fn rpm_to_rad_s(v: f64) -> f64 {
    use uom::si::angular_velocity::radian_per_second;
    rpm(v).get::<radian_per_second>()
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(0.2);
        let _p = pa(101_325.0);
        let _mu = pas(0.02);
        let _w = newton(-112_814.91);
        let _r = unitless(0.5);
    }

    #[test]
    fn rpm_conversion() {
        let w = rpm_to_rad_s(900.0);
        assert!((w - 94.247_779_607_693_8).abs() < 1e-9);
    }
}
