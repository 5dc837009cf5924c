//! Breadcrumbs, back target, and enter targets.

use presence_rules::ContentNode;

use super::composition::{Breadcrumb, Navigation, NavigationTarget, TargetKind};
use super::NavigationContext;
use crate::resolver::ResolvedDimension;

/// Build the navigation block for a page.
///
/// `children` must already be in display order. Enter targets and quick
/// actions disappear entirely once the depth budget is spent.
pub fn compose_navigation(
    content: &ContentNode,
    children: &[&ContentNode],
    navigation: &NavigationContext,
    dimension: &ResolvedDimension,
    quick_link_limit: usize,
) -> Navigation {
    let breadcrumb = breadcrumb(&navigation.path);

    let back = navigation.can_go_back.then(|| {
        let parent_path = navigation
            .path
            .split_last()
            .map(|(_, rest)| rest.to_vec())
            .unwrap_or_default();
        NavigationTarget {
            id: parent_path.last().cloned().unwrap_or_default(),
            label: parent_path
                .last()
                .map(|segment| humanize(segment))
                .unwrap_or_else(|| "Back".to_string()),
            path: parent_path,
            kind: TargetKind::Back,
            enabled: true,
        }
    });

    let (targets, quick_actions) = if dimension.can_descend() {
        (
            children
                .iter()
                .map(|child| enter_target(child, &navigation.path))
                .collect(),
            content
                .children
                .iter()
                .take(quick_link_limit)
                .map(|child| enter_target(child, &navigation.path))
                .collect(),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Navigation {
        breadcrumb,
        targets,
        back,
        quick_actions,
    }
}

fn enter_target(child: &ContentNode, path: &[String]) -> NavigationTarget {
    let mut target_path = path.to_vec();
    target_path.push(child.id.clone());
    NavigationTarget {
        id: child.id.clone(),
        label: if child.label.is_empty() {
            humanize(&child.id)
        } else {
            child.label.clone()
        },
        path: target_path,
        kind: TargetKind::Enter,
        enabled: !child.state.is_locked,
    }
}

/// One crumb per path segment, each pointing at the path up to itself.
pub fn breadcrumb(path: &[String]) -> Vec<Breadcrumb> {
    path.iter()
        .enumerate()
        .map(|(i, segment)| Breadcrumb {
            label: humanize(segment),
            path: path[..=i].to_vec(),
        })
        .collect()
}

/// Turn a kebab, snake, or camel case segment into Title Case words.
pub fn humanize(segment: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in segment.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
