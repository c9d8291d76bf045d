// crates/error-contract/src/contract.rs
// ============================================================================
// Module: Contract Guards
// Description: Precondition guards and the exception construction protocol.
// Purpose: Turn failed conditions into code-identified exceptions.
// Dependencies: crate::{codes, diagnostics, error, exception, format, registry, safe}
// ============================================================================

//! ## Overview
//! A [`Contract`] checks conditions and, on violation, returns an exception
//! carrying an [`Error`]. Guards are reached through [`Contract::check`],
//! which collects an optional explicit error, a message template and its
//! arguments before the condition is tested:
//!
//! ```ignore
//! let name = contract.check().message("user {0}").arg(id).throw_if_blank(name)?;
//! ```
//!
//! Without an explicit error each guard resolves its own [`ContractError`]
//! identity, only when the condition fails. `raising::<E>()` and
//! `raising_with(factory)` switch the failure type to a caller exception; if
//! that exception cannot be built the result is a carrier whose inner carrier
//! holds [`ContractError::CantInstantiateException`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::codes::ContractError;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::FallbackEvent;
use crate::diagnostics::NoopDiagnosticSink;
use crate::diagnostics::ViolationEvent;
use crate::error::Error;
use crate::exception::ConstructError;
use crate::exception::ContractException;
use crate::exception::ErrorCarrier;
use crate::exception::ErrorException;
use crate::exception::TypedFailure;
use crate::format;
use crate::registry::ContractEnum;
use crate::registry::ErrorRegistry;
use crate::safe::to_safe_string;

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Guard entry point bound to an error registry and a diagnostic sink.
#[derive(Clone)]
pub struct Contract {
    /// Resolves default error identities.
    registry: ErrorRegistry,
    /// Receives violation and fallback events.
    sink: Arc<dyn DiagnosticSink>,
}

impl Contract {
    /// Creates a contract over `registry` that does not report events.
    #[must_use]
    pub fn new(registry: ErrorRegistry) -> Self {
        Self {
            registry,
            sink: Arc::new(NoopDiagnosticSink),
        }
    }

    /// Reports violations and fallbacks to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &ErrorRegistry {
        &self.registry
    }

    /// Starts a guard with no explicit error, message or arguments.
    #[must_use]
    pub fn check(&self) -> Check<'_> {
        Check {
            contract: self,
            error: None,
            message: None,
            args: Vec::new(),
            raise: Carrier,
        }
    }

    /// Interpolates `args` into `template`, never failing.
    #[must_use]
    pub fn format_message(template: &str, args: &[String]) -> String {
        format::format_message(template, args)
    }

    /// Builds the carrier for a violation.
    ///
    /// `error` defaults to [`ContractError::General`].
    #[must_use]
    pub fn raise(&self, error: Option<Error>, message: Option<&str>, args: &[String]) -> ErrorException {
        let error = self.error_or_general(error);
        self.carrier(error, format::format_message(message.unwrap_or_default(), args))
    }

    /// Builds exception `E` for a violation, falling back to the carrier.
    #[must_use]
    pub fn raise_as<E: ContractException>(
        &self,
        error: Option<Error>,
        message: Option<&str>,
        args: &[String],
    ) -> TypedFailure<E> {
        self.raise_with(E::from_violation, error, message, args)
    }

    /// Builds an exception through `factory`, falling back to the carrier.
    #[must_use]
    pub fn raise_with<E, F>(
        &self,
        factory: F,
        error: Option<Error>,
        message: Option<&str>,
        args: &[String],
    ) -> TypedFailure<E>
    where
        E: ErrorCarrier,
        F: FnOnce(String, Error) -> Result<E, ConstructError>,
    {
        let error = self.error_or_general(error);
        self.typed(factory, error, format::format_message(message.unwrap_or_default(), args))
    }

    /// Returns `error`, or the general contract error.
    fn error_or_general(&self, error: Option<Error>) -> Error {
        error.unwrap_or_else(|| self.registry.to_error(ContractError::General, &[]))
    }

    /// Builds and reports the carrier.
    fn carrier(&self, error: Error, message: String) -> ErrorException {
        let exception = ErrorException::new(message, error);
        self.sink.record_violation(&ViolationEvent::new(
            exception.error(),
            exception.base_message(),
            type_name::<ErrorException>(),
        ));
        exception
    }

    /// Builds the requested exception, or the carrier with a construction cause.
    fn typed<E, F>(&self, factory: F, error: Error, message: String) -> TypedFailure<E>
    where
        E: ErrorCarrier,
        F: FnOnce(String, Error) -> Result<E, ConstructError>,
    {
        let requested = type_name::<E>();
        match factory(message.clone(), error.clone()) {
            Ok(exception) => {
                self.sink.record_violation(&ViolationEvent::new(exception.error(), &message, requested));
                TypedFailure::Typed(exception)
            }
            Err(cause) => {
                self.sink.record_fallback(&FallbackEvent::new(&error, requested, cause.to_string()));
                let inner = ErrorException::from_error(
                    self.registry
                        .to_error(ContractError::CantInstantiateException, &[requested.to_string()]),
                );
                TypedFailure::Fallback(self.carrier(error, message).with_inner(inner))
            }
        }
    }
}

impl Default for Contract {
    fn default() -> Self {
        Self::new(ErrorRegistry::default())
    }
}

// ============================================================================
// SECTION: Raise Policies
// ============================================================================

/// Decides which exception a failed guard produces.
pub trait Raise {
    /// Exception produced on violation.
    type Failure;

    /// Builds the exception for `error` and an already formatted `message`.
    fn raise(self, contract: &Contract, error: Error, message: String) -> Self::Failure;
}

/// Produces [`ErrorException`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Carrier;

impl Raise for Carrier {
    type Failure = ErrorException;

    fn raise(self, contract: &Contract, error: Error, message: String) -> ErrorException {
        contract.carrier(error, message)
    }
}

/// Produces `E` through [`ContractException::from_violation`].
pub struct RaiseAs<E> {
    /// Requested exception type.
    marker: PhantomData<fn() -> E>,
}

impl<E: ContractException> Raise for RaiseAs<E> {
    type Failure = TypedFailure<E>;

    fn raise(self, contract: &Contract, error: Error, message: String) -> TypedFailure<E> {
        contract.typed(E::from_violation, error, message)
    }
}

/// Produces `E` through a call-site factory.
pub struct RaiseWith<E, F> {
    /// Exception factory.
    factory: F,
    /// Requested exception type.
    marker: PhantomData<fn() -> E>,
}

impl<E, F> Raise for RaiseWith<E, F>
where
    E: ErrorCarrier,
    F: FnOnce(String, Error) -> Result<E, ConstructError>,
{
    type Failure = TypedFailure<E>;

    fn raise(self, contract: &Contract, error: Error, message: String) -> TypedFailure<E> {
        contract.typed(self.factory, error, message)
    }
}

// ============================================================================
// SECTION: Type Checks
// ============================================================================

/// Value whose concrete type can be inspected at runtime.
///
/// `Box<dyn AnyValue>` and `Box<dyn Any>` are transparent: both methods
/// describe the boxed value, not the box. Values only known as `dyn Any`
/// report `dyn core::any::Any` as their type name.
pub trait AnyValue {
    /// Returns the concrete type name.
    fn value_type_name(&self) -> &'static str;

    /// Returns the value as [`Any`].
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AnyValue for T {
    fn value_type_name(&self) -> &'static str {
        match unbox(self) {
            Some(Unboxed::Typed(inner)) => inner.value_type_name(),
            Some(Unboxed::Erased(inner)) => AnyValue::value_type_name(inner),
            None => type_name::<T>(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        match unbox(self) {
            Some(Unboxed::Typed(inner)) => inner.as_any(),
            Some(Unboxed::Erased(inner)) => AnyValue::as_any(inner),
            None => self,
        }
    }
}

impl AnyValue for dyn Any {
    fn value_type_name(&self) -> &'static str {
        match unbox(self) {
            Some(Unboxed::Typed(inner)) => inner.value_type_name(),
            Some(Unboxed::Erased(inner)) => AnyValue::value_type_name(inner),
            None => type_name::<dyn Any>(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        match unbox(self) {
            Some(Unboxed::Typed(inner)) => inner.as_any(),
            Some(Unboxed::Erased(inner)) => AnyValue::as_any(inner),
            None => self,
        }
    }
}

/// Value found behind one box layer.
enum Unboxed<'a> {
    /// Boxed as `dyn AnyValue`; the type name is still known.
    Typed(&'a dyn AnyValue),
    /// Boxed as `dyn Any`.
    Erased(&'a dyn Any),
}

/// Opens `value` when it is a boxed trait object.
fn unbox(value: &dyn Any) -> Option<Unboxed<'_>> {
    if let Some(inner) = value.downcast_ref::<Box<dyn AnyValue>>() {
        return Some(Unboxed::Typed(&**inner));
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any>>() {
        return Some(Unboxed::Erased(&**inner));
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any + Send>>() {
        return Some(Unboxed::Erased(&**inner));
    }
    if let Some(inner) = value.downcast_ref::<Box<dyn Any + Send + Sync>>() {
        return Some(Unboxed::Erased(&**inner));
    }
    None
}

// ============================================================================
// SECTION: Guards
// ============================================================================

/// Pending guard: explicit error, message template, arguments and raise policy.
///
/// Every guard consumes the check and returns `Err` on violation.
pub struct Check<'a, R = Carrier> {
    /// Owning contract.
    contract: &'a Contract,
    /// Explicit error overriding the guard's default.
    error: Option<Error>,
    /// Message template.
    message: Option<String>,
    /// Message arguments.
    args: Vec<String>,
    /// Raise policy.
    raise: R,
}

impl<'a, R: Raise> Check<'a, R> {
    /// Uses `error` instead of the guard's default error.
    #[must_use]
    pub fn error(mut self, error: Error) -> Self {
        self.error = Some(error);
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Appends a message argument.
    #[must_use]
    pub fn arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Appends message arguments.
    #[must_use]
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_string()));
        self
    }

    /// Raises `E` instead of the current failure type.
    #[must_use]
    pub fn raising<E: ContractException>(self) -> Check<'a, RaiseAs<E>> {
        Check {
            contract: self.contract,
            error: self.error,
            message: self.message,
            args: self.args,
            raise: RaiseAs {
                marker: PhantomData,
            },
        }
    }

    /// Raises the exception built by `factory` instead of the current failure type.
    #[must_use]
    pub fn raising_with<E, F>(self, factory: F) -> Check<'a, RaiseWith<E, F>>
    where
        E: ErrorCarrier,
        F: FnOnce(String, Error) -> Result<E, ConstructError>,
    {
        Check {
            contract: self.contract,
            error: self.error,
            message: self.message,
            args: self.args,
            raise: RaiseWith {
                factory,
                marker: PhantomData,
            },
        }
    }

    /// Fails when `value` is absent; returns the present value.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfNull`].
    pub fn throw_if_null<T>(self, value: Option<T>) -> Result<T, R::Failure> {
        match value {
            Some(value) => Ok(value),
            None => Err(self.fail(|registry| registry.to_error(ContractError::ThrowIfNull, &[]))),
        }
    }

    /// Fails when `value` is present.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfNotNull`], described
    /// with the value's type and rendering. The type is the static `T`: for a
    /// boxed trait object such as `Box<dyn Display>` the description names the
    /// box, not the value inside it.
    pub fn throw_if_not_null<T: fmt::Display>(self, value: Option<T>) -> Result<(), R::Failure> {
        match value {
            None => Ok(()),
            Some(value) => Err(self.fail(|registry| {
                registry.to_error(
                    ContractError::ThrowIfNotNull,
                    &[type_name::<T>().to_string(), value.to_string()],
                )
            })),
        }
    }

    /// Fails when `condition` is false.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfFalse`].
    pub fn throw_if_false(self, condition: bool) -> Result<(), R::Failure> {
        if condition {
            return Ok(());
        }
        Err(self.fail(|registry| registry.to_error(ContractError::ThrowIfFalse, &[])))
    }

    /// Fails when `condition` is true.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfTrue`].
    pub fn throw_if_true(self, condition: bool) -> Result<(), R::Failure> {
        if !condition {
            return Ok(());
        }
        Err(self.fail(|registry| registry.to_error(ContractError::ThrowIfTrue, &[])))
    }

    /// Fails when `value` is absent, empty or whitespace; returns the string.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfStringIsNullOrWhiteSpace`].
    pub fn throw_if_blank<'v>(self, value: Option<&'v str>) -> Result<&'v str, R::Failure> {
        match value {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(self.fail(|registry| {
                registry.to_error(ContractError::ThrowIfStringIsNullOrWhiteSpace, &[])
            })),
        }
    }

    /// Fails when `left == right`.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfEqual`], described with
    /// both operands.
    pub fn throw_if_equal<T>(self, left: &T, right: &T) -> Result<(), R::Failure>
    where
        T: PartialEq + fmt::Display + ?Sized,
    {
        self.throw_if_equal_by(left, right, |left, right| left == right)
    }

    /// Fails when `comparer` reports the operands as equal.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfEqual`], described with
    /// both operands.
    pub fn throw_if_equal_by<T, C>(self, left: &T, right: &T, comparer: C) -> Result<(), R::Failure>
    where
        T: fmt::Display + ?Sized,
        C: FnOnce(&T, &T) -> bool,
    {
        if !comparer(left, right) {
            return Ok(());
        }
        Err(self.fail(|registry| {
            registry.to_error(ContractError::ThrowIfEqual, &operand_args(left, right))
        }))
    }

    /// Fails when `left != right`.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfNotEqual`], described
    /// with both operands.
    pub fn throw_if_not_equal<T>(self, left: &T, right: &T) -> Result<(), R::Failure>
    where
        T: PartialEq + fmt::Display + ?Sized,
    {
        self.throw_if_not_equal_by(left, right, |left, right| left == right)
    }

    /// Fails when `comparer` reports the operands as different.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfNotEqual`], described
    /// with both operands.
    pub fn throw_if_not_equal_by<T, C>(
        self,
        left: &T,
        right: &T,
        comparer: C,
    ) -> Result<(), R::Failure>
    where
        T: fmt::Display + ?Sized,
        C: FnOnce(&T, &T) -> bool,
    {
        if comparer(left, right) {
            return Ok(());
        }
        Err(self.fail(|registry| {
            registry.to_error(ContractError::ThrowIfNotEqual, &operand_args(left, right))
        }))
    }

    /// Fails when `value` is present and not a `T`; returns the typed reference.
    ///
    /// An absent value passes and yields `None`. Boxed values are checked by
    /// their contents (see [`AnyValue`]).
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfNotType`], described
    /// with the source and target type names.
    pub fn throw_if_not_type<'v, T, V>(self, value: Option<&'v V>) -> Result<Option<&'v T>, R::Failure>
    where
        T: Any,
        V: AnyValue + ?Sized,
    {
        let Some(value) = value else {
            return Ok(None);
        };
        if let Some(typed) = value.as_any().downcast_ref::<T>() {
            return Ok(Some(typed));
        }
        let source = value.value_type_name();
        Err(self.fail(|registry| {
            registry.to_error(
                ContractError::ThrowIfNotType,
                &[source.to_string(), type_name::<T>().to_string()],
            )
        }))
    }

    /// Fails when `value` is not the value of a member of `T`; returns the member.
    ///
    /// Values that do not fit in `i64` are never members.
    ///
    /// # Errors
    ///
    /// Returns the failure for [`ContractError::ThrowIfInvalidEnumValue`],
    /// described with the value and the enumeration name.
    pub fn throw_if_invalid_enum_value<T, V>(self, value: V) -> Result<T, R::Failure>
    where
        T: ContractEnum,
        V: TryInto<i64> + fmt::Display + Copy,
    {
        if let Some(member) = value.try_into().ok().and_then(T::from_value) {
            return Ok(member);
        }
        Err(self.fail(|registry| {
            registry.to_error(
                ContractError::ThrowIfInvalidEnumValue,
                &[value.to_string(), T::TYPE_NAME.to_string()],
            )
        }))
    }

    /// Builds the failure, resolving the default error only when none was given.
    fn fail(self, default_error: impl FnOnce(&ErrorRegistry) -> Error) -> R::Failure {
        let error = match self.error {
            Some(error) => error,
            None => default_error(&self.contract.registry),
        };
        let message =
            format::format_message(self.message.as_deref().unwrap_or_default(), &self.args);
        self.raise.raise(self.contract, error, message)
    }
}

/// Renders both operands of a comparison.
fn operand_args<T: fmt::Display + ?Sized>(left: &T, right: &T) -> [String; 2] {
    [to_safe_string(Some(left)), to_safe_string(Some(right))]
}
