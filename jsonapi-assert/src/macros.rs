/// JSON key of a declared member: the field name, unless renamed with `as "key"`
macro_rules! member_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

/// Declares an entity struct together with its [`Schema`](crate::assert::Schema) impl.
///
/// Every member is written as `field: Type = assertion`; the same assertion drives the runtime
/// check and the static shape, so they cannot drift apart. Members are checked in declaration
/// order. Rules listed after `check` run once every member passed.
macro_rules! schema {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field:ident $(as $key:literal)? : $ty:ty = $assert:expr
            ),* $(,)?
        }
        $(check $($rule:ty),+ ;)?
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                pub $field: $ty,
            )*
        }

        impl $crate::assert::Schema for $name {
            const NAME: &'static str = stringify!($name);

            fn assert(
                name: &str, value: Option<&serde_json::Value>,
            ) -> $crate::Result<Self> {
                let object = $crate::assert::object_like(name, value)?;
                $crate::assert::trace_unknown_members(
                    name,
                    object,
                    &[$(member_key!($field $(, $key)?)),*],
                );
                let entity = Self {
                    $(
                        $field: $crate::assert::Assert::assert(
                            &$assert,
                            &$crate::assert::member_path(name, member_key!($field $(, $key)?)),
                            object.get(member_key!($field $(, $key)?)),
                        )?,
                    )*
                };
                $($(<$rule as $crate::rule::Rule<Self>>::check(name, &entity)?;)+)?
                Ok(entity)
            }

            fn describe(produced: bool) -> $crate::shape::Shape {
                let fields = vec![
                    $({
                        let assert = $assert;
                        let shape = if produced {
                            $crate::assert::Assert::produces(&assert)
                        } else {
                            $crate::assert::Assert::accepts(&assert)
                        };
                        $crate::shape::Field::new(
                            member_key!($field $(, $key)?),
                            shape,
                            !$crate::assert::absence_permissive(&assert),
                        )
                    }),*
                ];
                $crate::shape::Shape::object(fields, produced)
            }
        }
    };
}
