use unitmath::{
    Error, Parser, Value,
    error::RuntimeError,
    interpreter::{
        scope::Options,
        value::{complex::ComplexNumber, matrix::Matrix},
    },
};

fn eval(parser: &mut Parser, src: &str) -> Value {
    parser.eval(src)
          .unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn eval_str(parser: &mut Parser, src: &str) -> String {
    eval(parser, src).to_string()
}

fn number(parser: &mut Parser, src: &str) -> f64 {
    match eval(parser, src) {
        Value::Number(n) => n,
        other => panic!("'{src}' gave {other:?}, expected a number"),
    }
}

fn size_of(value: &Value) -> (usize, usize) {
    match value {
        Value::Matrix(m) => m.size(),
        other => panic!("expected a matrix, found {other:?}"),
    }
}

#[test]
fn precedence() {
    let mut parser = Parser::new();

    assert_eq!(number(&mut parser, "4-2+3"), 5.0);
    assert_eq!(number(&mut parser, "4-(2+3)"), -1.0);
    assert_eq!(number(&mut parser, "4-2-3"), -1.0);
    assert_eq!(number(&mut parser, "4-(2-3)"), 5.0);

    assert_eq!(number(&mut parser, "2+3*4"), 14.0);
    assert_eq!(number(&mut parser, "2*3+4"), 10.0);
    assert_eq!(number(&mut parser, "2*3^2"), 18.0);

    assert_eq!(number(&mut parser, "2^3"), 8.0);
    assert_eq!(number(&mut parser, "2^3^4"), 2_f64.powf(3_f64.powf(4.0)));
    assert_eq!(number(&mut parser, "1.5^1.5^1.5"),
               number(&mut parser, "1.5^(1.5^1.5)"));
    assert_eq!(number(&mut parser, "1.5^1.5^1.5^1.5"),
               number(&mut parser, "1.5^(1.5^(1.5^1.5))"));

    assert_eq!(number(&mut parser, "-3^2"), -9.0);
    assert_eq!(number(&mut parser, "(-3)^2"), 9.0);

    assert_eq!(number(&mut parser, "2^3!"), 64.0);
    assert_eq!(number(&mut parser, "2^(3!)"), 64.0);

    assert_eq!(number(&mut parser, "-4!"), -24.0);
    assert_eq!(number(&mut parser, "3!+2"), 8.0);
}

#[test]
fn transpose_and_products() {
    let mut parser = Parser::new();

    assert_eq!(eval_str(&mut parser, "[1,2;3,4]' * 2"), "[[2, 6], [4, 8]]");
    assert_eq!(eval_str(&mut parser, "[1,2;3,4]' * [5,6;7,8]"), "[[26, 30], [38, 44]]");
    assert_eq!(eval_str(&mut parser, "[1,2;3,4] * [5,6;7,8]'"), "[[17, 23], [39, 53]]");
    assert_eq!(eval_str(&mut parser, "[1,2;3,4]'+2"), "[[3, 5], [4, 6]]");
    assert_eq!(eval_str(&mut parser, "transpose([[1,2],[3,4]]) * 2"), "[[2, 6], [4, 8]]");
}

#[test]
fn constants() {
    let mut parser = Parser::new();

    assert_eq!(eval(&mut parser, "i"), Value::Complex(ComplexNumber::new(0.0, 1.0)));
    assert_eq!(number(&mut parser, "pi"), std::f64::consts::PI);
}

#[test]
fn function_calls() {
    let mut parser = Parser::new();

    assert_eq!(number(&mut parser, "sqrt(4)"), 2.0);
    assert_eq!(number(&mut parser, "sqrt(6+3)"), 3.0);
    assert_eq!(number(&mut parser, "atan2(2,2)"), 0.785_398_163_397_448_3);
}

#[test]
fn variables_and_ans() {
    let mut parser = Parser::new();

    assert_eq!(number(&mut parser, "a = 0.75"), 0.75);
    assert_eq!(number(&mut parser, "a + 2"), 2.75);
    assert_eq!(number(&mut parser, "a = 2"), 2.0);
    assert_eq!(number(&mut parser, "a + 2"), 4.0);
    assert_eq!(number(&mut parser, "ans * 10"), 40.0);
    assert_eq!(parser.get("ans"), Ok(Value::Number(40.0)));
}

#[test]
fn ranges() {
    let mut parser = Parser::new();

    assert!(matches!(eval(&mut parser, "2:5"), Value::Range(_)));
    assert_eq!(eval_str(&mut parser, "[2:5]"), "[[2, 3, 4, 5]]");
    assert_eq!(eval_str(&mut parser, "[10:-2:2]"), "[[10, 8, 6, 4, 2]]");
    assert_eq!(eval_str(&mut parser, "(1:4) + 1"), "[[2, 3, 4, 5]]");
}

#[test]
fn matrix_literals() {
    let mut parser = Parser::new();

    assert!(matches!(eval(&mut parser, "[1,2;3,4]"), Value::Matrix(_)));
    let m = eval(&mut parser, "[1,2,3;4,5,6]");
    assert_eq!(size_of(&m), (2, 3));
    assert_eq!(m.to_string(), "[[1, 2, 3], [4, 5, 6]]");
    assert_eq!(eval(&mut parser, "[ ]"), Value::Matrix(Matrix::empty()));
    assert_eq!(eval_str(&mut parser, "[1, 2\n3, 4]"), "[[1, 2], [3, 4]]");
}

#[test]
fn indexed_write_grows_matrix() {
    let mut parser = Parser::new();

    parser.eval("a=[1,2;3,4]").unwrap();
    parser.eval("a(1,1) = 100").unwrap();
    let a = parser.get("a").unwrap();
    assert_eq!(size_of(&a), (2, 2));
    assert_eq!(a.to_string(), "[[100, 2], [3, 4]]");

    parser.eval("a(2:3,2:3) = [10,11;12,13]").unwrap();
    let a = parser.get("a").unwrap();
    assert_eq!(size_of(&a), (3, 3));
    assert_eq!(a.to_string(), "[[100, 2, 0], [3, 10, 11], [0, 12, 13]]");

    assert_eq!(eval_str(&mut parser, "a(1:3,1:2)"), "[[100, 2], [3, 10], [0, 12]]");
}

#[test]
fn indexed_write_into_unbound_name() {
    let mut parser = Parser::new();

    parser.eval("v(3) = 7").unwrap();
    assert_eq!(parser.get("v").unwrap().to_string(), "[[0, 0, 7]]");

    parser.eval("w(2, 2) = 1").unwrap();
    assert_eq!(parser.get("w").unwrap().to_string(), "[[0, 0], [0, 1]]");
}

#[test]
fn failed_write_leaves_scope_intact() {
    let mut parser = Parser::new();

    parser.eval("a = [1, 2; 3, 4]").unwrap();
    assert!(parser.eval("a(1:2, 1:2) = [1, 2, 3]").is_err());
    assert!(parser.eval("a = undefined_name").is_err());
    assert_eq!(parser.get("a").unwrap().to_string(), "[[1, 2], [3, 4]]");
}

#[test]
fn matrix_concatenation() {
    let mut parser = Parser::new();

    parser.eval("a=[1,2;3,4]").unwrap();
    parser.eval("b=[5,6;7,8]").unwrap();
    assert_eq!(eval_str(&mut parser, "c=[a,b]"), "[[1, 2, 5, 6], [3, 4, 7, 8]]");
    assert_eq!(eval_str(&mut parser, "c=[a;b]"), "[[1, 2], [3, 4], [5, 6], [7, 8]]");
    assert_eq!(eval_str(&mut parser, "c=[a,b;b,a]"),
               "[[1, 2, 5, 6], [3, 4, 7, 8], [5, 6, 1, 2], [7, 8, 3, 4]]");
    assert_eq!(eval_str(&mut parser, "c=[[1,2]; [3,4]]"), "[[1, 2], [3, 4]]");
    assert_eq!(eval_str(&mut parser, "c=[1; [2;3]]"), "[[1], [2], [3]]");
    assert_eq!(eval_str(&mut parser, "[[],[]]"), "[]");
    assert_eq!(eval_str(&mut parser, "size([[],[]])"), "[[0, 0]]");

    let err = parser.eval("c=[a; [1,2,3] ]").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::DimensionMismatch { .. })));
}

#[test]
fn matrix_transpose() {
    let mut parser = Parser::new();

    assert_eq!(eval_str(&mut parser, "[1,2,3;4,5,6]'"), "[[1, 4], [2, 5], [3, 6]]");
    assert!(matches!(eval(&mut parser, "[1,2,3;4,5,6]'"), Value::Matrix(_)));
    assert_eq!(number(&mut parser, "23'"), 23.0);
    assert_eq!(eval_str(&mut parser, "[1:4]"), "[[1, 2, 3, 4]]");
    assert_eq!(eval_str(&mut parser, "[1:4]'"), "[[1], [2], [3], [4]]");
    assert_eq!(eval_str(&mut parser, "size([1:4])"), "[[1, 4]]");
}

#[test]
fn units() {
    let mut parser = Parser::new();

    assert_eq!(eval_str(&mut parser, "5cm"), "50 mm");
    assert!(matches!(eval(&mut parser, "5cm"), Value::Unit(_)));
    assert_eq!(eval_str(&mut parser, "(5.08 cm * 1000) in inch"), "2000 inch");
    assert_eq!(eval_str(&mut parser, "(5.08 cm * 1000) in mm"), "50800 mm");
    assert_eq!(eval_str(&mut parser, "ans in inch"), "2000 inch");
    assert_eq!(eval_str(&mut parser, "1 / (2 s)"), "0.5 s^-1");
    assert_eq!(eval_str(&mut parser, "1 / (4 ms)"), "0.25 ms^-1");

    // `in` binds tighter than `*`, so the conversion is applied to `1000`.
    assert!(parser.eval("5.08 cm * 1000 in inch").is_err());
}

#[test]
fn late_bound_functions() {
    let mut parser = Parser::new();

    assert_eq!(number(&mut parser, "a = 3"), 3.0);
    assert_eq!(eval(&mut parser, "function f(x) = a * x"), Value::from("f(x)"));
    assert_eq!(number(&mut parser, "f(2)"), 6.0);
    assert_eq!(number(&mut parser, "a = 5"), 5.0);
    assert_eq!(number(&mut parser, "f(2)"), 10.0);

    assert_eq!(eval(&mut parser, "function g(x) = x^q"), Value::from("g(x)"));
    let err = parser.eval("g(3)").unwrap_err();
    assert!(err.to_string().contains("Undefined symbol q"), "{err}");
    assert_eq!(number(&mut parser, "q = 4/2"), 2.0);
    assert_eq!(number(&mut parser, "g(3)"), 9.0);
}

#[test]
fn read_only_parser() {
    let mut parser = Parser::with_options(Options { read_only: true,
                                                    ..Options::default() });

    assert_eq!(parser.get("pi"), Ok(Value::Number(std::f64::consts::PI)));
    assert_eq!(number(&mut parser, "2 * pi"), 2.0 * std::f64::consts::PI);

    for src in ["b = 43", "function f(x) = a * x", "a([1,1])= [4]"] {
        let err = parser.eval(src).unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::ReadOnly { .. })), "{src}: {err}");
    }
    assert!(matches!(parser.set("a", Value::Number(3.0)),
                     Err(RuntimeError::ReadOnly { .. })));
    assert!(parser.get("b").is_err());
}

#[test]
fn remove_and_clear() {
    let mut parser = Parser::new();

    parser.eval("x = 1; y = 2").unwrap();
    assert!(parser.remove("x").unwrap().is_some());
    assert!(parser.get("x").is_err());

    parser.clear().unwrap();
    assert!(parser.get("y").is_err());
    assert!(parser.get("pi").is_ok());
}

#[test]
fn parse_errors_report_position() {
    let mut parser = Parser::new();

    let Err(Error::Parse(err)) = parser.eval("2 + (3 * 4") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.position(), 4);

    let Err(Error::Parse(err)) = parser.eval("1 + #") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.position(), 4);
}

#[test]
fn oversized_values_are_rejected() {
    let mut parser = Parser::new();

    for src in ["zeros(2^32, 2^32)",
                "ones(2^40)",
                "eye(2^20)",
                "[1:1e20]",
                "(1:1e20) + 1",
                "size(1:1e20)",
                "(1:2^13)' * (1:2^13)"]
    {
        let err = parser.eval(src).unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::Range { .. })), "{src}: {err}");
    }

    parser.eval("m = 1").unwrap();
    assert!(matches!(parser.eval("m(2^32, 2^32) = 1"),
                     Err(Error::Runtime(RuntimeError::Range { .. }))));
    assert_eq!(parser.get("m"), Ok(Value::Number(1.0)));
    assert_eq!(eval_str(&mut parser, "size(1:2^20)"), "[[1, 1048576]]");
}
