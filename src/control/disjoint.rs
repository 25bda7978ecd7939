//! A closed container for one of two mutually exclusive outcomes.
//!
//! `Disjoint<L, R>` holds exactly one value, in its `Left` or `Right`
//! variant. The type itself carries no success/failure polarity; callers
//! assign meaning to the sides. Conversions to [`Optional`] are explicit.

use std::fmt;

use super::Optional;

/// A value of one of two possible shapes.
///
/// Exactly one variant is populated, the tag is fixed at construction, and
/// no implicit coercion between variants exists.
///
/// # Examples
///
/// ```rust
/// use valgebra::control::Disjoint;
///
/// let left: Disjoint<i32, &str> = Disjoint::left(42);
/// let right: Disjoint<i32, &str> = Disjoint::right("value");
///
/// assert!(left.is_left());
/// assert!(right.is_right());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disjoint<L, R> {
    /// The left outcome.
    Left(L),
    /// The right outcome.
    Right(R),
}

impl<L, R> Disjoint<L, R> {
    /// Creates a left value.
    #[inline]
    pub const fn left(value: L) -> Self {
        Self::Left(value)
    }

    /// Creates a right value.
    #[inline]
    pub const fn right(value: R) -> Self {
        Self::Right(value)
    }

    /// Returns `true` if this is a left value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a right value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Converts from `&Disjoint<L, R>` to `Disjoint<&L, &R>`.
    #[inline]
    pub const fn as_ref(&self) -> Disjoint<&L, &R> {
        match self {
            Self::Left(value) => Disjoint::Left(value),
            Self::Right(value) => Disjoint::Right(value),
        }
    }

    /// Transforms the left value, leaving a right value untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Disjoint;
    ///
    /// let left: Disjoint<i32, &str> = Disjoint::left(21);
    /// assert_eq!(left.map_left(|x| x * 2), Disjoint::left(42));
    ///
    /// let right: Disjoint<i32, &str> = Disjoint::right("value");
    /// assert_eq!(right.map_left(|x| x * 2), Disjoint::right("value"));
    /// ```
    #[inline]
    pub fn map_left<L2, F>(self, function: F) -> Disjoint<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Self::Left(value) => Disjoint::Left(function(value)),
            Self::Right(value) => Disjoint::Right(value),
        }
    }

    /// Transforms the right value, leaving a left value untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Disjoint;
    ///
    /// let right: Disjoint<&str, i32> = Disjoint::right(21);
    /// assert_eq!(right.map_right(|x| x * 2), Disjoint::right(42));
    /// ```
    #[inline]
    pub fn map_right<R2, F>(self, function: F) -> Disjoint<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Self::Left(value) => Disjoint::Left(value),
            Self::Right(value) => Disjoint::Right(function(value)),
        }
    }

    /// Transforms whichever side is populated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Disjoint;
    ///
    /// let left: Disjoint<i32, &str> = Disjoint::left(21);
    /// assert_eq!(left.bimap(|x| x * 2, str::len), Disjoint::left(42));
    /// ```
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> Disjoint<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Self::Left(value) => Disjoint::Left(on_left(value)),
            Self::Right(value) => Disjoint::Right(on_right(value)),
        }
    }

    /// Collapses both sides into a single result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Disjoint;
    ///
    /// let value: Disjoint<i32, &str> = Disjoint::left(42);
    /// assert_eq!(value.fold(|x| x.to_string(), str::to_string), "42");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => on_left(value),
            Self::Right(value) => on_right(value),
        }
    }

    /// Exchanges the sides.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Disjoint;
    ///
    /// let left: Disjoint<i32, &str> = Disjoint::left(42);
    /// assert_eq!(left.swap(), Disjoint::right(42));
    /// ```
    #[inline]
    pub fn swap(self) -> Disjoint<R, L> {
        match self {
            Self::Left(value) => Disjoint::Right(value),
            Self::Right(value) => Disjoint::Left(value),
        }
    }

    /// Extracts the left value as an `Optional`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::{Disjoint, Optional};
    ///
    /// let left: Disjoint<i32, &str> = Disjoint::left(42);
    /// assert_eq!(left.left_optional(), Optional::present(42));
    ///
    /// let right: Disjoint<i32, &str> = Disjoint::right("value");
    /// assert_eq!(right.left_optional(), Optional::absent());
    /// ```
    #[inline]
    pub fn left_optional(self) -> Optional<L> {
        match self {
            Self::Left(value) => Optional::Present(value),
            Self::Right(_) => Optional::Absent,
        }
    }

    /// Extracts the right value as an `Optional`.
    #[inline]
    pub fn right_optional(self) -> Optional<R> {
        match self {
            Self::Left(_) => Optional::Absent,
            Self::Right(value) => Optional::Present(value),
        }
    }

    /// Returns the left value.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on a right value.
    #[inline]
    pub fn unwrap_left(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => panic!("no such element: unwrap_left() on Right"),
        }
    }

    /// Returns the right value.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on a left value.
    #[inline]
    pub fn unwrap_right(self) -> R {
        match self {
            Self::Left(_) => panic!("no such element: unwrap_right() on Left"),
            Self::Right(value) => value,
        }
    }
}

impl<L, R> From<Result<R, L>> for Disjoint<L, R> {
    /// `Ok` maps to `Right`, `Err` maps to `Left`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Disjoint<L, R>> for Result<R, L> {
    #[inline]
    fn from(disjoint: Disjoint<L, R>) -> Self {
        match disjoint {
            Disjoint::Left(value) => Err(value),
            Disjoint::Right(value) => Ok(value),
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Disjoint<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Disjoint<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => write!(formatter, "Left({value})"),
            Self::Right(value) => write!(formatter, "Right({value})"),
        }
    }
}
