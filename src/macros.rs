#[macro_export]
macro_rules! hamster {
    // Handle null
    (null) => {
        $crate::Value::Empty
    };

    // Booleans ride as integers, matching the serde bridge
    (true) => {
        $crate::Value::Int(1)
    };

    (false) => {
        $crate::Value::Int(0)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::hamster!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::ObjectMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ObjectMap::new();
        $(
            object.insert($key.to_string(), $crate::hamster!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any other expression. Values the format cannot carry
    // (negative numbers, fractional floats) collapse to Empty here; use
    // to_value directly when the error matters.
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Empty)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{ObjectMap, Value};

    #[test]
    fn test_hamster_macro_primitives() {
        assert_eq!(hamster!(null), Value::Empty);
        assert_eq!(hamster!(true), Value::Int(1));
        assert_eq!(hamster!(false), Value::Int(0));
        assert_eq!(hamster!(42), Value::Int(42));
        assert_eq!(hamster!(2.0), Value::Int(2));
        assert_eq!(hamster!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_hamster_macro_rejected_expressions_collapse_to_empty() {
        assert_eq!(hamster!(-1), Value::Empty);
        assert_eq!(hamster!(3.5), Value::Empty);
    }

    #[test]
    fn test_hamster_macro_arrays() {
        assert_eq!(hamster!([]), Value::Array(vec![]));

        let arr = hamster!([1, 2, 3]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Int(1));
                assert_eq!(vec[1], Value::Int(2));
                assert_eq!(vec[2], Value::Int(3));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_hamster_macro_objects() {
        assert_eq!(hamster!({}), Value::Object(ObjectMap::new()));

        let obj = hamster!({
            "name": "Alice",
            "age": 30
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Int(30)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_hamster_macro_nesting() {
        let value = hamster!({
            "id": 7,
            "tags": ["a", "b"],
            "meta": { "empty": null },
        });

        let map = value.as_object().unwrap();
        assert_eq!(map.get("id"), Some(&Value::Int(7)));
        assert_eq!(
            map.get("tags"),
            Some(&Value::Array(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ]))
        );
        let meta = map.get("meta").unwrap().as_object().unwrap();
        assert_eq!(meta.get("empty"), Some(&Value::Empty));
    }
}
