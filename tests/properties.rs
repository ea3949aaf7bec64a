use unitmath::{Parser, Value, evaluate, parse, Scope};

fn eval(scope: &mut Scope, src: &str) -> Result<Value, String> {
    let expr = parse(src).map_err(|e| e.to_string())?;
    evaluate(&expr, scope).map_err(|e| e.to_string())
}

fn number(scope: &mut Scope, src: &str) -> f64 {
    match eval(scope, src) {
        Ok(Value::Number(n)) => n,
        other => panic!("'{src}' gave {other:?}, expected a number"),
    }
}

const INTEGERS: [i64; 9] = [0, 1, -1, 6, -9, 12, 35, 1024, -462];

#[test]
fn gcd_is_commutative_and_non_negative() {
    let mut scope = Scope::new();

    for a in INTEGERS {
        for b in INTEGERS {
            let ab = number(&mut scope, &format!("gcd({a}, {b})"));
            let ba = number(&mut scope, &format!("gcd({b}, {a})"));
            assert_eq!(ab, ba, "gcd({a}, {b})");
            assert!(ab >= 0.0, "gcd({a}, {b}) = {ab}");
        }
    }
}

#[test]
fn gcd_divides_both_arguments() {
    let mut scope = Scope::new();

    for a in INTEGERS {
        for b in INTEGERS {
            let g = number(&mut scope, &format!("gcd({a}, {b})"));
            if g == 0.0 {
                assert!(a == 0 && b == 0);
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let (a, b) = (a as f64, b as f64);
            assert_eq!(a % g, 0.0, "gcd {g} does not divide {a}");
            assert_eq!(b % g, 0.0, "gcd {g} does not divide {b}");
        }
    }
}

#[test]
fn gcd_rejects_non_integers() {
    let mut scope = Scope::new();

    for src in ["gcd(2.5, 5)", "gcd(4, 0.1)", "gcd(2 + 3i, 4)", "gcd(\"a\", 2)"] {
        assert!(eval(&mut scope, src).is_err(), "{src} should fail");
    }
    let err = eval(&mut scope, "gcd(2.5, 5)").unwrap_err();
    assert!(err.contains("must be integer"), "{err}");
}

#[test]
fn unequal_is_negated_equal() {
    let mut scope = Scope::new();
    let values = ["2", "3", "2 + 3i", "2 cm", "20 mm", "true", "\"2\"", "[1, 2]", "1:2"];

    for x in values {
        for y in values {
            let equal = eval(&mut scope, &format!("equal({x}, {y})"));
            let unequal = eval(&mut scope, &format!("unequal({x}, {y})"));
            match (equal, unequal) {
                (Ok(Value::Bool(e)), Ok(Value::Bool(u))) => assert_eq!(e, !u, "{x} vs {y}"),
                (Ok(Value::Matrix(e)), Ok(Value::Matrix(u))) => {
                    for (e, u) in e.data().iter().zip(u.data()) {
                        assert_eq!(e, &Value::Bool(u != &Value::Bool(true)), "{x} vs {y}");
                    }
                },
                (Err(_), Err(_)) => {},
                (e, u) => panic!("equal({x}, {y}) = {e:?} but unequal = {u:?}"),
            }
        }
    }
}

#[test]
fn cross_base_unit_comparisons_fail_both_ways() {
    let mut scope = Scope::new();

    assert!(eval(&mut scope, "equal(2 cm, 2 kg)").is_err());
    assert!(eval(&mut scope, "unequal(2 cm, 2 kg)").is_err());
}

#[test]
fn unit_conversion_round_trip() {
    let mut scope = Scope::new();
    let cases = [("3.7 inch", "cm"), ("12 km", "mile"), ("45 deg", "rad"), ("2.5 h", "s"), ("3 lb", "g")];

    for (quantity, unit) in cases {
        let original = eval(&mut scope, quantity).unwrap();
        let back = eval(&mut scope, &format!("({quantity} in {unit}) in {}", unit_of(quantity))).unwrap();
        let (Value::Unit(original), Value::Unit(back)) = (original, back) else {
            panic!("{quantity} is not a unit");
        };
        assert!((original.value - back.value).abs() <= 1e-12 * original.value.abs(),
                "{quantity} came back as {back}");
        assert_eq!(back.to_string(), quantity);
    }
}

fn unit_of(quantity: &str) -> &str {
    quantity.rsplit(' ').next().unwrap_or(quantity)
}

#[test]
fn precedence_table() {
    let mut scope = Scope::new();

    assert_eq!(number(&mut scope, "4-2+3"), 5.0);
    assert_eq!(number(&mut scope, "4-(2+3)"), -1.0);
    assert_eq!(number(&mut scope, "2+3*4"), 14.0);
    assert_eq!(number(&mut scope, "2*3^2"), 18.0);
    assert_eq!(number(&mut scope, "2^3^4"), number(&mut scope, "pow(2, pow(3, 4))"));
    assert_eq!(number(&mut scope, "-3^2"), -9.0);
    assert_eq!(number(&mut scope, "(-3)^2"), 9.0);
    assert_eq!(number(&mut scope, "2^3!"), 64.0);
}

#[test]
fn late_binding_uses_current_values() {
    let mut parser = Parser::new();

    parser.eval("a = 3; function f(x) = a * x").unwrap();
    assert_eq!(parser.eval("f(2)").unwrap(), Value::Number(6.0));
    parser.eval("a = 5").unwrap();
    assert_eq!(parser.eval("f(2)").unwrap(), Value::Number(10.0));
}

#[test]
fn parameters_shadow_scope_values() {
    let mut parser = Parser::new();

    parser.eval("x = 100; function f(x) = x + 1").unwrap();
    assert_eq!(parser.eval("f(1)").unwrap(), Value::Number(2.0));
    assert_eq!(parser.get("x"), Ok(Value::Number(100.0)));
}

#[test]
fn read_only_scope_rejects_every_mutation() {
    let mut scope = Scope::read_only();

    for src in ["a = 1", "a(2) = 1", "function f(x) = x"] {
        assert!(eval(&mut scope, src).is_err(), "{src} should fail");
    }
    assert!(scope.set("a", Value::Number(1.0)).is_err());
    assert!(scope.get("pi").is_ok());
    assert!(eval(&mut scope, "sqrt(pi * 4)").is_ok());
}
