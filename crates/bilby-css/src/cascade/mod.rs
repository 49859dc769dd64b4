//! CSS cascading and style tree construction.
//!
//! [CSS Cascading and Inheritance Level 4 § 6](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! "The cascade takes an unordered list of declared values for a given
//! property on a given element, sorts them by their declaration's
//! precedence, and outputs a single cascaded value."
//!
//! The precedence order here is the dialect's subset of the full cascade:
//! specificity first, stylesheet source order as the tiebreaker. There is no
//! origin layering, no `!important`, and no inheritance of computed values.

use bilby_dom::{DomTree, ElementData, NodeId};

use crate::parser::{Rule, Stylesheet};
use crate::selector::Specificity;
use crate::style::{PropertyMap, StyledNode};

/// A matched rule with the specificity it contributes to cascade ordering.
struct MatchedRule<'a> {
    specificity: Specificity,
    rule: &'a Rule,
}

/// If `rule` matches `elem`, return it with its contributing specificity.
///
/// A rule matches when ANY of its comma-separated selectors matches. The
/// selectors are stored most-specific-first, so the first hit carries the
/// highest specificity among the matching ones - that is the value the rule
/// competes with in the cascade.
fn match_rule<'a>(elem: &ElementData, rule: &'a Rule) -> Option<MatchedRule<'a>> {
    rule.selectors
        .iter()
        .find(|selector| selector.matches(elem))
        .map(|selector| MatchedRule {
            specificity: selector.specificity(),
            rule,
        })
}

/// Find all rules in the stylesheet that match the given element, in
/// stylesheet order.
fn matching_rules<'a>(elem: &ElementData, stylesheet: &'a Stylesheet) -> Vec<MatchedRule<'a>> {
    stylesheet
        .rules
        .iter()
        .filter_map(|rule| match_rule(elem, rule))
        .collect()
}

/// [§ 6.4.3 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
///
/// Resolve the property map for one element.
///
/// Matching rules are sorted ascending by specificity - the sort is stable,
/// so rules of equal specificity keep their stylesheet order - and their
/// declarations applied in that order, each overwriting any earlier value
/// for the same property. Net effect: the highest-specificity rule wins, and
/// within equal specificity the later rule wins.
///
/// An element no rule matches simply gets an empty map; that is the normal
/// case for unstyled markup, never an error.
#[must_use]
pub fn specified_values(elem: &ElementData, stylesheet: &Stylesheet) -> PropertyMap {
    let mut values = PropertyMap::new();
    let mut rules = matching_rules(elem, stylesheet);

    // Go through the rules from lowest to highest specificity.
    rules.sort_by(|a, b| a.specificity.cmp(&b.specificity));
    for matched in rules {
        for declaration in &matched.rule.declarations {
            let _ = values.insert(declaration.name.clone(), declaration.value.clone());
        }
    }
    values
}

/// Apply a stylesheet to a DOM subtree, returning a parallel styled tree.
///
/// Element nodes get their cascaded property map; text nodes (and the
/// document node, if the traversal is rooted there) get an empty map.
/// Children are visited in document order. The function is pure: same DOM
/// and stylesheet in, same styled tree out, with no caching in between.
#[must_use]
pub fn style_tree(tree: &DomTree, id: NodeId, stylesheet: &Stylesheet) -> StyledNode {
    let specified = tree
        .as_element(id)
        .map(|elem| specified_values(elem, stylesheet))
        .unwrap_or_default();

    StyledNode {
        node: id,
        specified_values: specified,
        children: tree
            .children(id)
            .iter()
            .map(|&child| style_tree(tree, child, stylesheet))
            .collect(),
    }
}
