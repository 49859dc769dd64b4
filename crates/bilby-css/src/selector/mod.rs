//! Simple selectors and specificity.
//!
//! The dialect supports exactly the selectors of
//! [Selectors Level 4 § 5-6](https://www.w3.org/TR/selectors-4/#elemental-selectors)
//! that need no tree context: type, id, class, and universal, optionally
//! concatenated into one compound (`div.note#main`). Combinators,
//! pseudo-classes, and attribute selectors are not part of the dialect.

use bilby_dom::ElementData;
use serde::Serialize;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors... in the selector (= B)
///  - count the number of type selectors... in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
///
/// The derived `Ord` is exactly that lexicographic comparison: the id count
/// dominates, then classes, then types. Never collapse this into a single
/// scalar; a selector with one id outranks one with any number of classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

/// A simple (compound) selector: one condition set on a single element.
///
/// Every axis is optional; a selector with all axes empty is the universal
/// selector and matches any element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// "A type selector is the name of a document language element type."
    /// `None` leaves the tag axis unconstrained.
    pub tag_name: Option<String>,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// "An ID selector is a hash (#, U+0023) immediately followed by the ID
    /// value." `None` leaves the id axis unconstrained.
    pub id: Option<String>,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// "The class selector is given as a full stop (.) immediately followed
    /// by an identifier." Every listed class must be present on the element.
    pub classes: Vec<String>,
}

impl SimpleSelector {
    /// [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// The (id, class, type) counts of this selector.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn specificity(&self) -> Specificity {
        let a = u32::from(self.id.is_some());
        let b = self.classes.len() as u32;
        let c = u32::from(self.tag_name.is_some());
        Specificity(a, b, c)
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Every constrained axis must hold: tag name equal, id equal, and all
    /// selector classes present on the element. An unconstrained axis always
    /// holds, so the empty selector matches everything.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        // Type selector
        if self
            .tag_name
            .as_ref()
            .is_some_and(|tag| *tag != element.tag_name)
        {
            return false;
        }

        // ID selector
        if self.id.as_deref().is_some_and(|id| Some(id) != element.id()) {
            return false;
        }

        // Class selectors: all must be present on the element
        let element_classes = element.classes();
        if self
            .classes
            .iter()
            .any(|class| !element_classes.contains(class.as_str()))
        {
            return false;
        }

        true
    }
}
