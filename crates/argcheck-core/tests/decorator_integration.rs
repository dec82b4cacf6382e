//! End-to-end tests for decorated calls
//!
//! These tests drive the public API the way a caller would: build a function,
//! decorate it, call it with valid and invalid arguments.

use argcheck_core::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn int_arg(args: &BoundArguments, name: &str) -> i64 {
    args[name].as_int().expect("integer argument")
}

/// foo(x, y=None) returning (x, y)
fn foo_pair() -> Function {
    Function::new(
        Signature::new("foo").param("x").param_with_default("y", Value::None),
        |args| Ok(Value::tuple([args["x"].clone(), args["y"].clone()])),
    )
}

#[test]
fn test_optional_type_with_default() {
    let foo = expect_types([("y", optional([ValueType::Str, ValueType::Int]))])
        .apply(foo_pair())
        .expect("valid decorator");

    assert_eq!(
        foo.call_positional(vec![Value::Int(3)]).unwrap(),
        Value::tuple([Value::Int(3), Value::None])
    );
    assert_eq!(
        foo.call_positional(vec![Value::Int(3), Value::from("a")]).unwrap(),
        Value::tuple([Value::Int(3), Value::from("a")])
    );

    let err = foo
        .call_positional(vec![Value::Int(3), Value::list([3])])
        .unwrap_err();
    assert!(err.is_type_mismatch());
    let mismatch = err.mismatch().expect("structured mismatch");
    assert_eq!(mismatch.function, "foo");
    assert_eq!(mismatch.argument, "y");
    assert_eq!(mismatch.actual, "list");
}

#[test]
fn test_method_style_funcname() {
    let init = Function::new(
        Signature::new("__init__").param("x").param_with_default("y", 3),
        |_| Ok(Value::None),
    );
    let init = expect_types([("y", [ValueType::Int, ValueType::Str])])
        .funcname("__init__")
        .apply(init)
        .unwrap();

    assert!(init.call(CallArgs::new().kwarg("x", 3)).is_ok());
    assert!(init.call(CallArgs::new().kwarg("x", 3).kwarg("y", 5)).is_ok());
    let err = init
        .call(CallArgs::new().kwarg("x", 1).kwarg("y", Value::list([3])))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "__init__() expected a value of type int or str for argument 'y', but got list instead."
    );
}

#[test]
fn test_bounded_inclusive_edges() {
    let inc = Function::new(Signature::new("foo").param("x"), |args| {
        Ok(Value::Int(int_arg(args, "x") + 1))
    });
    let foo = expect_bounded([("x", (1, 5))]).apply(inc).unwrap();

    assert_eq!(foo.call_positional(vec![Value::Int(1)]).unwrap(), Value::Int(2));
    assert_eq!(foo.call_positional(vec![Value::Int(5)]).unwrap(), Value::Int(6));
    let err = foo.call_positional(vec![Value::Int(6)]).unwrap_err();
    assert_eq!(err.kind(), Some(MismatchKind::Value));
    assert_eq!(
        err.to_string(),
        "foo() expected a value inclusively between 1 and 5 for argument 'x', but got 6 instead."
    );

    let err = foo.call_positional(vec![Value::Float(f64::NAN)]).unwrap_err();
    assert_eq!(err.kind(), Some(MismatchKind::Value));
    assert_eq!(
        err.to_string(),
        "foo() expected a value inclusively between 1 and 5 for argument 'x', but got nan instead."
    );
}

#[test]
fn test_bool_counts_as_int() {
    let foo = expect_types([("x", ValueType::Int)])
        .apply(foo_pair())
        .unwrap();
    assert_eq!(
        foo.call_positional(vec![Value::Bool(true)]).unwrap(),
        Value::tuple([Value::Bool(true), Value::None])
    );

    let foo = preprocess()
        .arg("x", coerce(ValueType::Int, Conversion::Str))
        .apply(foo_pair())
        .unwrap();
    assert_eq!(
        foo.call_positional(vec![Value::Bool(true)]).unwrap(),
        Value::tuple([Value::from("True"), Value::None])
    );
}

#[test]
fn test_floordiff_coercion() {
    let floordiff = Function::new(Signature::new("floordiff").param("x").param("y"), |args| {
        Ok(Value::Int(int_arg(args, "x") - int_arg(args, "y")))
    });
    let floordiff = preprocess()
        .arg("x", coerce(ValueType::Float, Conversion::Int))
        .arg("y", coerce(ValueType::Float, Conversion::Int))
        .apply(floordiff)
        .unwrap();

    assert_eq!(
        floordiff.call_positional(vec![Value::Float(3.2), Value::Float(2.5)]).unwrap(),
        Value::Int(1)
    );
    // ints are already the target type
    assert_eq!(
        floordiff.call_positional(vec![Value::Int(7), Value::Int(2)]).unwrap(),
        Value::Int(5)
    );
}

#[test]
fn test_add_binary_strings() {
    let add = Function::new(Signature::new("add_binary_strings").param("x").param("y"), |args| {
        Ok(Value::Str(format!("{:b}", int_arg(args, "x") + int_arg(args, "y"))))
    });
    let add = preprocess()
        .arg("x", coerce(ValueType::Str, Conversion::Int).kwarg("base", 2))
        .arg("y", coerce(ValueType::Str, Conversion::Int).kwarg("base", 2))
        .apply(add)
        .unwrap();

    assert_eq!(
        add.call_positional(vec!["101".into(), "001".into()]).unwrap(),
        Value::from("110")
    );

    // conversion errors reach the caller as they are
    let err = add.call_positional(vec!["101".into(), "2".into()]).unwrap_err();
    assert!(matches!(err, Error::Conversion { .. }));
    assert_eq!(err.to_string(), "invalid literal for int() with base 2: '2'");
}

#[test]
fn test_coerce_types_pairs() {
    let f = coerce_types([
        ("x", Coercion::from((ValueType::Float, Conversion::Int))),
        (
            "y",
            Coercion::new([
                coerce(ValueType::Int, Conversion::Str),
                coerce([ValueType::List, ValueType::Tuple], Conversion::Tuple),
            ]),
        ),
    ])
    .apply(foo_pair())
    .unwrap();

    let out = f
        .call_positional(vec![Value::Float(2.9), Value::Int(4)])
        .unwrap();
    assert_eq!(out, Value::tuple([Value::Int(2), Value::from("4")]));

    let out = f
        .call_positional(vec![Value::Int(1), Value::list(["a"])])
        .unwrap();
    assert_eq!(out.repr(), "(1, ('a',))");
}

#[test]
fn test_custom_preprocessor_with_optionally() {
    let must_be_int = Preprocessor::new("must_be_int", |_, _, value| match value {
        Value::Int(_) => Ok(value),
        _ => Err(Error::custom("arg must be int")),
    });
    let identity = Function::new(Signature::new("f").param("a"), |args| Ok(args["a"].clone()));
    let f = preprocess()
        .arg("a", optionally(must_be_int))
        .apply(identity)
        .unwrap();

    assert_eq!(f.call_positional(vec![Value::Int(1)]).unwrap(), Value::Int(1));
    assert!(f.call_positional(vec![Value::None]).unwrap().is_none());
    let err = f.call_positional(vec!["a".into()]).unwrap_err();
    assert_eq!(err.to_string(), "arg must be int");
    assert_eq!(err.kind(), None);
}

#[test]
fn test_custom_preprocessor_replaces_value() {
    // non-cumulative returns from a cumulative series
    let ensure_noncumul = Preprocessor::new("ensure_noncumul", |_, _, value| {
        let mut dict = match value {
            Value::Dict(dict) => dict,
            other => return Ok(other),
        };
        if dict.get("type") == Some(&Value::from("cumul")) {
            let returns: Vec<f64> = dict
                .get("return")
                .and_then(|r| match r {
                    Value::List(items) => Some(items.iter().filter_map(Value::as_float).collect()),
                    _ => None,
                })
                .unwrap_or_default();
            let changes: Vec<Value> = returns
                .windows(2)
                .map(|w| Value::Float(w[1] / w[0] - 1.0))
                .collect();
            dict.insert("return".to_string(), Value::List(changes));
            dict.insert("type".to_string(), "noncumul".into());
        }
        Ok(Value::Dict(dict))
    });

    let mean = Function::new(Signature::new("calc_mean_return").param("return_dict"), |args| {
        match &args["return_dict"] {
            Value::Dict(dict) => Ok(dict.get("return").cloned().unwrap_or(Value::None)),
            other => Err(Error::custom(format!("unexpected {}", other.type_name()))),
        }
    });
    let mean = preprocess()
        .arg("return_dict", ensure_noncumul)
        .apply(mean)
        .unwrap();

    let input = Value::from(serde_json::json!({"type": "cumul", "return": [1.0, 2.0, 3.0]}));
    let out = mean.call(CallArgs::new().kwarg("return_dict", input)).unwrap();
    assert_eq!(out, Value::list([1.0, 0.5]));
}

#[test]
fn test_call_helper_builds_composite_check() {
    let positive_int = call("positive_int", |value: Value| {
        Check::from(ValueType::Int).evaluate(&value)?;
        Check::StrictlyBounded(Bounds::at_least(0)).evaluate(&value)?;
        Ok(value)
    });
    let identity = Function::new(Signature::new("g").param("n"), |args| Ok(args["n"].clone()));
    let g = preprocess().arg("n", positive_int).apply(identity).unwrap();

    assert!(g.call_positional(vec![Value::Int(2)]).is_ok());
    let err = g.call_positional(vec![Value::Int(0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "g() expected a value strictly greater than 0 for argument 'n', but got 0 instead."
    );
    assert!(g
        .call_positional(vec![Value::Float(1.0)])
        .unwrap_err()
        .is_type_mismatch());
}

#[test]
fn test_stacked_decorators_run_outermost_first() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorder = |label: &'static str| {
        let order = order.clone();
        Preprocessor::new(label, move |_, _, value| {
            if let Ok(mut seen) = order.lock() {
                seen.push(label);
            }
            Ok(value)
        })
    };

    let inner = preprocess()
        .arg("x", recorder("inner"))
        .apply(foo_pair())
        .unwrap();
    let outer = preprocess()
        .arg("x", recorder("outer"))
        .apply(inner)
        .unwrap();

    outer.call_positional(vec![Value::Int(1)]).unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
    assert_eq!(outer.signature().name(), "foo");
}

#[test]
fn test_kinds_and_dimensions() {
    let first = Function::new(Signature::new("foo").param("x").param("y"), |args| {
        let x = args["x"].as_array().and_then(|a| a.get(&[0])).cloned();
        let y = args["y"].as_array().and_then(|a| a.get(&[0, 0])).cloned();
        match (x, y) {
            (Some(x), Some(y)) => Ok(Value::Int(x.as_int().unwrap_or(0) + y.as_int().unwrap_or(0))),
            _ => Err(Error::custom("index out of range")),
        }
    });
    let foo = expect_dimensions([("x", 1), ("y", 2)]).apply(first).unwrap();

    let x = NdArray::from_vec(DType::Int64, [1, 1]);
    let y = NdArray::from_rows(DType::Int64, vec![vec![1, 1], vec![2, 2], vec![3, 4]]).unwrap();
    assert_eq!(
        foo.call_positional(vec![x.clone().into(), y.into()]).unwrap(),
        Value::Int(2)
    );

    let err = foo
        .call_positional(vec![x.clone().into(), x.into()])
        .unwrap_err();
    assert!(err.is_value_mismatch());
    assert_eq!(
        err.to_string(),
        "foo() expected a 2-D array for argument 'y', but got a 1-D array instead."
    );
}

#[test]
fn test_ensure_preprocessors_in_decorator() {
    let f = Function::new(
        Signature::new("schedule").param("when").param("tz").param("code"),
        |args| Ok(Value::tuple([args["when"].clone(), args["tz"].clone(), args["code"].clone()])),
    );
    let f = preprocess()
        .arg("when", ensure_timestamp())
        .arg("tz", ensure_timezone())
        .arg("code", ensure_upper_case())
        .apply(f)
        .unwrap();

    let out = f
        .call_positional(vec!["2020-03-01T12:00:00Z".into(), "utc".into(), "aapl".into()])
        .unwrap();
    let Value::Tuple(items) = out else {
        panic!("expected a tuple");
    };
    assert!(matches!(items[0], Value::Timestamp(_)));
    assert_eq!(items[1], Value::Timezone(Timezone::Utc));
    assert_eq!(items[2], Value::from("AAPL"));

    let err = f
        .call_positional(vec!["2020-03-01".into(), "utc".into(), Value::Int(1)])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "schedule() expected argument 'code' to be a string, but got int instead."
    );
}

#[test]
fn test_decoration_time_errors() {
    let err = expect_types([("z", ValueType::Int)]).apply(foo_pair()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let err = preprocess()
        .arg("x", coerce(ValueType::Str, Conversion::Float).kwarg("base", 2))
        .apply(foo_pair())
        .unwrap_err();
    assert!(err.to_string().contains("'base' is an invalid keyword argument for float()"));

    let err = preprocess()
        .arg("x", coerce(ValueType::Str, Conversion::Int))
        .arg("x", coerce(ValueType::Float, Conversion::Int))
        .apply(foo_pair())
        .unwrap_err();
    assert!(err.to_string().contains("more than one coercion"));
}

#[test]
fn test_success_path_is_transparent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let add = Function::new(Signature::new("add").param("a").param_with_default("b", 10), move |args| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Int(int_arg(args, "a") + int_arg(args, "b")))
    });
    let plain = add.clone();
    let checked = expect_types([("a", ValueType::Int), ("b", ValueType::Int)])
        .apply(add)
        .unwrap();

    for args in [
        CallArgs::positional([1]),
        CallArgs::positional([1, 2]),
        CallArgs::new().kwarg("b", 3).kwarg("a", 4),
    ] {
        assert_eq!(checked.call(args.clone()).unwrap(), plain.call(args).unwrap());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[test]
fn test_error_keywords_vocabulary() {
    let err = expect_element([("x", ["a", "b"])])
        .apply(foo_pair())
        .unwrap()
        .call_positional(vec!["c".into()])
        .unwrap_err();
    let message = err.to_string();
    let mut last = 0;
    for keyword in error_keywords::ALL {
        let at = message[last..].find(keyword).expect("keyword in message") + last;
        last = at + keyword.len();
    }
    assert_eq!(coerce_string(&Value::tuple(["a", "b"])), "('a', 'b')");
}

#[test]
fn test_rejected_keywords() {
    let f = reject_keywords([("y", "foo() no longer accepts 'y'")])
        .apply(foo_pair())
        .unwrap();
    assert!(f.call_positional(vec![Value::Int(1), Value::Int(2)]).is_ok());
    let err = f
        .call(CallArgs::new().arg(1).kwarg("y", 2))
        .unwrap_err();
    assert_eq!(err.to_string(), "foo() no longer accepts 'y'");
    assert!(err.is_type_mismatch());
}
