use std::fs;

use unitmath::get_result;
use walkdir::WalkDir;

#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "math"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&content, false) {
            panic!("Script {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2\nassert(x == 3)");
    assert_success("x = 7 * 9\nassert(x == 63)");
    assert_success("x = 8 - 5\nassert(x == 3)");
    assert_success("x = 10 / 2\nassert(x == 5)");
    assert_success("a = b = 4\nassert(a + b == 8)");
}

#[test]
fn builtin_functions() {
    assert_success("assert(sin(0) == 0)");
    assert_success("assert(abs(-5) == 5)");
    assert_success("x = 9\nassert(sqrt(x) == 3)");
    assert_success("assert(round(3.7) == 4)");
    assert_success("assert(round(3.14159, 2) == 3.14)");
    assert_success("assert(floor(-2.5) == -3)");
    assert_success("assert(ceil(2.1) == 3)");
    assert_success("assert(sign(-42) == -1)");
    assert_success("assert(sign(0) == 0)");
    assert_success("assert(sign(11) == 1)");
    assert_success("assert(log10(1000) == 3)");
    assert_success("assert(sin(90 deg) == 1)");
}

#[test]
fn builtins_map_over_matrices() {
    assert_success("assert(abs([-1, 2; -3, 4]) == [1, 2; 3, 4])");
    assert_success("assert(sqrt([1, 4; 9, 16]) == [1, 2; 3, 4])");
    assert_success("assert(factorial([3, 4]) == [6, 24])");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_success("sqrt = [10, 20, 30]\nassert(sqrt(2) == 20)");
    assert_success("function abs(x) = x\nassert(abs(-3) == -3)");
}

#[test]
fn user_defined_function_and_calls() {
    assert_success("function square(x) = x * x\nassert(square(3) == 9)");
    assert_success("function sum(a, b) = a + b\nassert(sum(2, 5) == 7)");
    assert_success("function twice(x) = 2 * x\nfunction quad(x) = twice(twice(x))\nassert(quad(3) == 12)");
}

#[test]
fn factorial() {
    assert_success("x = 5!\nassert(x == 120)");
    assert_success("z = -4!\nassert(z == -24)");
    assert_success("assert(0! == 1)");
}

#[test]
fn comparisons() {
    assert_success("assert(2 < 3)");
    assert_success("assert(3 > 2)");
    assert_success("assert(2 <= 2)");
    assert_success("assert(3 >= 3)");
    assert_success("assert(2 != 3)");
    assert_success("assert(2 == 2)");
    assert_success("assert(true)");
    assert_success("assert(false == false)");
    assert_success("assert(1:3 == [1, 2, 3])");
}

#[test]
fn booleans_coerce_to_numbers() {
    assert_success("assert(true + true == 2)");
    assert_success("assert((2 < 3) * 5 == 5)");
}

#[test]
fn strings() {
    assert_success(r#"s = "abc" + 1
assert(s == "abc1")"#);
    assert_success(r#"assert("a" != "b")"#);
    assert_success(r#"assert(size("hello") == [5])"#);
}

#[test]
fn matrices_and_indexing() {
    assert_success("a = [1, 2, 3]\nassert(a(1) == 1)\nassert(a(3) == 3)");
    assert_success("b = [1, 2; 3, 4]\nassert(b(2, 1) == 3)");
    assert_success("b = [1, 2; 3, 4]\nassert(b(2, 1:2) == [3, 4])");
    assert_success("b = [1, 2; 3, 4]\nassert(b(1:2, 2) == [2; 4])");
    assert_success("assert([4, 5, 6](2) == 5)");
    assert_success("v = [1, 2]\nv(5) = 9\nassert(v == [1, 2, 0, 0, 9])");
}

#[test]
fn matrix_math_and_elementwise() {
    assert_success("a = [1, 2, 3] * 2\nassert(a(3) == 6)");
    assert_success("b = [4, 5, 6] + [1, 2, 3]\nassert(b(2) == 7)");
    assert_success("c = [2, 4, 6] / 2\nassert(c(1) == 1)");
    assert_success("d = 2 * [3, 4, 5]\nassert(d(3) == 10)");
    assert_success("m = [1, 1; 1, 0] ^ 5\nassert(m == [8, 5; 5, 3])");
    assert_success("assert(det([0, 2; 3, 0]) == -6)");
}

#[test]
fn complex_numbers() {
    assert_success("c = 2 + 3i\nassert(conj(c) == 2 - 3i)");
    assert_success("assert((2 + 3i) ^ 2 == -5 + 12i)");
    assert_success("assert(sqrt(-4) == 2i)");
    assert_success("assert(re(3 - 4i) == 3)\nassert(im(3 - 4i) == -4)\nassert(abs(3 - 4i) == 5)");
}

#[test]
fn units() {
    assert_success("assert(1 m == 100 cm)");
    assert_success("assert(2 m > 150 cm)");
    assert_success("d = 3 * 2 km\nassert(d == 6000 m)");
}

#[test]
fn division_by_zero_is_infinite() {
    assert_success("assert(1 / 0 == Infinity)");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("assert(foo == 1)");
}

#[test]
fn failing_assertion_is_error() {
    assert_failure("assert(1 == 2)");
}

#[test]
fn wrong_function_arity_is_error() {
    assert_failure("function f(x, y) = x + y\nf(3)");
    assert_failure("sqrt(1, 2)");
}

#[test]
fn incompatible_units_are_error() {
    assert_failure("1 cm + 1 kg");
    assert_failure("1 cm < 1 s");
    assert_failure("(2 kg) in inch");
}

#[test]
fn shape_mismatch_is_error() {
    assert_failure("[1, 2] + [1, 2, 3]");
    assert_failure("[1, 2; 3, 4] * [1, 2, 3]");
    assert_failure("a = [1, 2]\na(3)");
}

#[test]
fn integer_domain_is_checked() {
    assert_failure("gcd(1.5, 3)");
    assert_failure("2.5!");
    assert_failure("[1, 2](1.5)");
}
