use super::*;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn close(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < 1e-9
}

#[test]
fn mobius_evaluates_formula() {
    let m = Mobius::new(c(2.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0));
    assert_eq!(m.evaluate(c(3.0, 1.0)).unwrap(), c(7.0, 2.0));
    assert_eq!(Mobius::identity().evaluate(c(-0.5, 0.25)).unwrap(), c(-0.5, 0.25));
}

#[test]
fn mobius_pole_is_singularity() {
    let m = Mobius::new(c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0));
    assert_eq!(m.evaluate(c(0.0, 0.0)), Err(DomainError::MapSingularity));
    assert!(close(m.evaluate(c(2.0, 0.0)).unwrap(), c(0.5, 0.0)));
}

#[test]
fn mobius_inverse_pole_is_singularity() {
    let inv = MobiusInverse::new(c(1.0, 0.0), c(0.0, -1.0), c(1.0, 0.0), c(0.0, 1.0));
    assert_eq!(inv.evaluate(c(1.0, 0.0)), Err(DomainError::MapSingularity));
}

#[test]
fn mobius_inverse_round_trips() {
    let coeffs = [
        (c(1.0, 0.0), c(0.0, -1.0), c(1.0, 0.0), c(0.0, 1.0)),
        (c(2.0, 1.0), c(-0.5, 0.0), c(0.25, -1.0), c(3.0, 0.5)),
        (c(0.0, 1.0), c(1.0, 1.0), c(-1.0, 0.0), c(0.5, 0.0)),
    ];
    let points = [c(0.3, -0.7), c(-2.0, 1.5), c(0.01, 0.02), c(10.0, -4.0)];
    for (a, b, cc, d) in coeffs {
        let m = Mobius::new(a, b, cc, d);
        assert!(!is_zero(m.determinant()));
        let inv = m.inverse();
        for z in points {
            let w = m.evaluate(z).unwrap();
            assert!(close(inv.evaluate(w).unwrap(), z), "z={z} w={w}");
        }
    }
}

#[test]
fn spiral_is_finite_for_square_region() {
    let s = SpiralInverse::new(2, 2).unwrap();
    let w = s.evaluate(c(1.0, 0.0)).unwrap();
    assert!(w.re.is_finite() && w.im.is_finite());
    assert!(close(w, c(0.0, 0.0)));
}

#[test]
fn spiral_matches_formula() {
    let s = SpiralInverse::new(3, 4).unwrap();
    let z = c(-1.0, 2.0);
    let phi = (3.0f64 / 4.0).atan();
    let expected = z.ln() * Complex64::from_polar(1.0, phi) * (5.0 / (2.0 * PI));
    assert!(close(s.evaluate(z).unwrap(), expected));
}

#[test]
fn spiral_singular_at_origin_and_rejects_empty_region() {
    let s = SpiralInverse::new(2, 2).unwrap();
    assert_eq!(s.evaluate(c(0.0, 0.0)), Err(DomainError::MapSingularity));
    assert!(SpiralInverse::new(0, 2).is_err());
    assert!(SpiralInverse::new(2, 0).is_err());
}

#[test]
fn spiral_seam_across_negative_real_axis() {
    let s = SpiralInverse::new(2, 2).unwrap();
    let above = s.evaluate(c(-1.0, 1e-9)).unwrap();
    let below = s.evaluate(c(-1.0, -1e-9)).unwrap();
    assert!((above - below).norm() > 1.0);
}

#[test]
fn non_finite_input_is_reported() {
    assert_eq!(
        Identity.evaluate(c(f64::NAN, 0.0)),
        Err(DomainError::InvalidDomainInput)
    );
    let m = Mobius::identity();
    assert_eq!(
        m.evaluate(c(f64::INFINITY, 0.0)),
        Err(DomainError::InvalidDomainInput)
    );
}

#[test]
fn fn_map_checks_closure_output() {
    let sq = FnMap(|z: Complex64| Ok::<_, DomainError>(z * z));
    assert_eq!(sq.evaluate(c(0.0, 1.0)).unwrap(), c(-1.0, 0.0));

    let sqrt_neg = FnMap(|z: Complex64| Ok::<_, DomainError>(Complex64::new(z.re.sqrt(), 0.0)));
    assert_eq!(
        sqrt_neg.evaluate(c(-4.0, 0.0)),
        Err(DomainError::InvalidDomainInput)
    );
}

#[test]
fn boxed_and_borrowed_maps_dispatch() {
    let boxed: Box<dyn ComplexMap> = Box::new(Mobius::identity());
    assert_eq!(boxed.evaluate(c(1.0, 2.0)).unwrap(), c(1.0, 2.0));
    let borrowed: &dyn ComplexMap = &Identity;
    assert_eq!(borrowed.evaluate(c(3.0, 0.0)).unwrap(), c(3.0, 0.0));
}

#[test]
fn map_spec_parses_and_builds() {
    let spec: MapSpec = serde_json::from_str(
        r#"{"kind":"mobius_inverse","a":[1,0],"b":[0,-1],"c":[1,0],"d":[0,1]}"#,
    )
    .unwrap();
    assert_eq!(
        spec,
        MapSpec::MobiusInverse {
            a: c(1.0, 0.0),
            b: c(0.0, -1.0),
            c: c(1.0, 0.0),
            d: c(0.0, 1.0),
        }
    );
    let map = spec.build().unwrap();
    assert!(close(map.evaluate(c(0.0, 0.0)).unwrap(), c(0.0, 1.0)));

    let spiral: MapSpec =
        serde_json::from_str(r#"{"kind":"spiral_inverse","height":2,"width":2}"#).unwrap();
    spiral.build().unwrap();

    let id: MapSpec = serde_json::from_str(r#"{"kind":"identity"}"#).unwrap();
    assert_eq!(id.build().unwrap().evaluate(c(1.0, 1.0)).unwrap(), c(1.0, 1.0));
}

#[test]
fn map_spec_rejects_bad_parameters() {
    let bad = MapSpec::SpiralInverse {
        height: 0,
        width: 4,
    };
    assert!(bad.build().is_err());

    let bad = MapSpec::Mobius {
        a: c(f64::NAN, 0.0),
        b: c(0.0, 0.0),
        c: c(0.0, 0.0),
        d: c(1.0, 0.0),
    };
    assert!(bad.validate().is_err());

    assert!(serde_json::from_str::<MapSpec>(r#"{"kind":"swirl"}"#).is_err());
}
