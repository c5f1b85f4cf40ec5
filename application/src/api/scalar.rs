//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper for the `#[graphql(with = ..)]` attribute, representing the target
/// type as a GraphQL string scalar through its `As` representation.
///
/// Output goes through the [`Display`] impl of `As`, input through its
/// [`FromStr`] impl. The target type must implement [`AsRef`]`<As>` and
/// [`TryFrom`]`<As>`.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Renders the target type as a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// - If the input value is not a string.
    /// - If the string does not parse as the `As` type.
    /// - If the parsed `As` value is rejected by the target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr + fmt::Display,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = || T::name(&()).expect("always has a name");

        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{}`: expected string input \
                 value, found: {input}",
                name(),
            )
        })?;
        s.parse::<As>()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{}` from \"{s}\" string: {e}",
                    name(),
                )
            })?
            .try_into()
            .map_err(|e| format!("Cannot parse input scalar `{}`: {e}", name()))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`] one.
    ///
    /// # Errors
    ///
    /// If the token cannot be parsed as a [`String`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
