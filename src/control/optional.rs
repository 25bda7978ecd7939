//! A closed presence/absence container.
//!
//! `Optional<T>` is a two-variant sum type: `Present(value)` or `Absent`.
//! Unlike a null-permitting reference, absence is a distinct shape that
//! exhaustive pattern matching cannot ignore, and `Present` holds its value
//! by construction.

use std::fmt;

/// A value that is either present or absent.
///
/// `Present` carries exactly one value; `Absent` carries nothing. A value
/// is never mutated after construction: every transformation returns a new
/// `Optional`.
///
/// # Examples
///
/// ```rust
/// use valgebra::control::Optional;
///
/// let present = Optional::present(5);
/// let absent: Optional<i32> = Optional::absent();
///
/// assert_eq!(present.map(|x| x * 2), Optional::present(10));
/// assert_eq!(absent.map(|x| x * 2), Optional::absent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optional<T> {
    /// A present value.
    Present(T),
    /// The absence of a value.
    Absent,
}

impl<T> Optional<T> {
    /// Creates a present value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let value = Optional::present(42);
    /// assert!(value.is_present());
    /// ```
    #[inline]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// Creates an absent value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let value: Optional<i32> = Optional::absent();
    /// assert!(value.is_absent());
    /// ```
    #[inline]
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// Returns `true` if the value is present.
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if the value is absent.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Converts from `&Optional<T>` to `Optional<&T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let value = Optional::present(String::from("algebra"));
    /// assert_eq!(value.as_ref().map(String::len), Optional::present(7));
    /// assert!(value.is_present());
    /// ```
    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Present(value) => Optional::Present(value),
            Self::Absent => Optional::Absent,
        }
    }

    /// Applies a function to the contained value, if present.
    ///
    /// The function is never invoked on `Absent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// assert_eq!(Optional::present(21).map(|x| x * 2), Optional::present(42));
    /// ```
    #[inline]
    pub fn map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Present(value) => Optional::Present(function(value)),
            Self::Absent => Optional::Absent,
        }
    }

    /// Applies a function returning an `Optional`, then flattens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let halve = |x: i32| if x % 2 == 0 {
    ///     Optional::present(x / 2)
    /// } else {
    ///     Optional::absent()
    /// };
    ///
    /// assert_eq!(Optional::present(42).flat_map(halve), Optional::present(21));
    /// assert_eq!(Optional::present(21).flat_map(halve), Optional::absent());
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Self::Present(value) => function(value),
            Self::Absent => Optional::Absent,
        }
    }

    /// Keeps a present value only if the predicate holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// assert_eq!(Optional::present(5).filter(|x| *x > 10), Optional::absent());
    /// assert_eq!(Optional::present(42).filter(|x| *x > 10), Optional::present(42));
    /// ```
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Present(value) if predicate(&value) => Self::Present(value),
            _ => Self::Absent,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics with a "no such element" message on `Absent`. Prefer
    /// [`get_or_else`](Optional::get_or_else) or pattern matching when
    /// absence is recoverable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// assert_eq!(Optional::present(42).get(), 42);
    /// ```
    #[inline]
    pub fn get(self) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => panic!("no such element: get() on Absent"),
        }
    }

    /// Returns the contained value or the given default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// assert_eq!(Optional::present(42).get_or_else(0), 42);
    /// assert_eq!(Optional::<i32>::absent().get_or_else(0), 0);
    /// ```
    #[inline]
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }

    /// Returns the contained value or computes a default.
    ///
    /// The supplier runs only on `Absent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// assert_eq!(Optional::<i32>::absent().get_or_else_with(|| 7), 7);
    /// ```
    #[inline]
    pub fn get_or_else_with<F>(self, supplier: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Present(value) => value,
            Self::Absent => supplier(),
        }
    }

    /// Returns this value if present, otherwise computes an alternative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let fallback = || Optional::present(0);
    /// assert_eq!(Optional::present(42).or_else(fallback), Optional::present(42));
    /// assert_eq!(Optional::absent().or_else(fallback), Optional::present(0));
    /// ```
    #[inline]
    pub fn or_else<F>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Present(value) => Self::Present(value),
            Self::Absent => supplier(),
        }
    }

    /// Applies an action to a present value and returns the container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valgebra::control::Optional;
    ///
    /// let mut seen = 0;
    /// let value = Optional::present(42).peek(|x| seen = *x);
    /// assert_eq!(seen, 42);
    /// assert_eq!(value, Optional::present(42));
    /// ```
    #[inline]
    pub fn peek<A>(self, action: A) -> Self
    where
        A: FnOnce(&T),
    {
        if let Self::Present(value) = &self {
            action(value);
        }
        self
    }
}

impl<T> Default for Optional<T> {
    /// The default value is `Absent`.
    #[inline]
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    /// Iterates over zero or one element.
    fn into_iter(self) -> Self::IntoIter {
        Option::from(self).into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(formatter, "Present({value})"),
            Self::Absent => formatter.write_str("Absent"),
        }
    }
}
