// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by layout containers.

use understory_widget_tree::WidgetId;

/// A rejected layout request.
///
/// These are caller mistakes. Containers never clamp a bad value into range; the request is
/// refused and the container is left unchanged.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A fraction outside `[0, 1]`, or NaN.
    #[error("fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),
    /// A negative or NaN item size.
    #[error("item size {0} is negative")]
    NegativeSize(f64),
    /// An item index past the end of the container.
    #[error("item index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of items in the container.
        len: usize,
    },
    /// The widget is not an item of the container.
    #[error("widget {0:?} is not an item of this container")]
    NotAnItem(WidgetId),
}

/// Check that `size` is usable as a primary-axis item size.
pub(crate) fn check_size(size: f64) -> Result<f64, LayoutError> {
    if size >= 0.0 {
        Ok(size)
    } else {
        Err(LayoutError::NegativeSize(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_reject_negative_and_nan() {
        assert_eq!(check_size(0.0), Ok(0.0));
        assert_eq!(check_size(12.5), Ok(12.5));
        assert_eq!(check_size(-1.0), Err(LayoutError::NegativeSize(-1.0)));
        assert!(check_size(f64::NAN).is_err(), "NaN is not a size");
    }
}
