//! Menu membership resolution.
//!
//! Decides, for every content node, which named menus it belongs to, and
//! applies `overrule_navigation` entries:
//!
//! - docs/website: nodes without a menu list join every default menu; an
//!   override entry removes its target menus from every content node (nodes
//!   left without menus are dropped) and is then appended itself.
//! - blog: every content node is placed in `overview` only; override
//!   entries are appended without touching existing nodes.
//!
//! Extension entries are never changed here.

use dokkie_config::{NavigationEntry, OVERVIEW_MENU, ProjectType, Settings};

use crate::node::{NavigationNode, NodeOrigin};

/// Resolve menu membership of `nodes` in place.
pub(crate) fn resolve_menus(nodes: &mut Vec<NavigationNode>, settings: &Settings) {
    match settings.project_type {
        ProjectType::Blog => resolve_blog(nodes, &settings.overrule_navigation),
        ProjectType::Docs | ProjectType::Website => resolve_docs(nodes, settings),
    }
}

fn resolve_blog(nodes: &mut Vec<NavigationNode>, overrules: &[NavigationEntry]) {
    for node in content_nodes(nodes) {
        node.meta.menu = Some(vec![OVERVIEW_MENU.to_owned()]);
    }

    nodes.extend(
        overrules
            .iter()
            .map(|entry| NavigationNode::from_entry(entry, NodeOrigin::Override)),
    );
}

fn resolve_docs(nodes: &mut Vec<NavigationNode>, settings: &Settings) {
    let default_menus = settings.default_menus();

    for node in content_nodes(nodes) {
        if node.meta.menu.is_none() {
            node.meta.menu = Some(default_menus.clone());
        }
    }

    if settings.overrule_navigation.is_empty() {
        return;
    }

    let mut stripped = vec![false; nodes.len()];
    let mut overrides = Vec::with_capacity(settings.overrule_navigation.len());

    for entry in &settings.overrule_navigation {
        let targets = entry.menu.clone().unwrap_or_else(|| default_menus.clone());

        for target in &targets {
            if settings.menu(target).is_none() {
                tracing::debug!(
                    menu = %target,
                    entry = %entry.name,
                    "Overrule entry targets a menu that is not shown"
                );
            }
        }

        for (idx, node) in nodes.iter_mut().enumerate() {
            if node.origin != NodeOrigin::Content {
                continue;
            }
            if let Some(menus) = node.meta.menu.as_mut() {
                let before = menus.len();
                menus.retain(|menu| !targets.contains(menu));
                stripped[idx] |= menus.len() != before;
            }
        }

        let mut node = NavigationNode::from_entry(entry, NodeOrigin::Override);
        node.meta.menu = Some(targets);
        overrides.push(node);
    }

    let mut idx = 0;
    nodes.retain(|node| {
        let emptied = stripped[idx] && node.meta.menu.as_ref().is_some_and(Vec::is_empty);
        idx += 1;
        if emptied {
            tracing::debug!(link = %node.link, "Node removed from every menu by overrule");
        }
        !emptied
    });

    nodes.extend(overrides);
}

fn content_nodes(nodes: &mut [NavigationNode]) -> impl Iterator<Item = &mut NavigationNode> {
    nodes
        .iter_mut()
        .filter(|node| node.origin == NodeOrigin::Content)
}
