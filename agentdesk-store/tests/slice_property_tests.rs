use agentdesk_core::{Agent, ListQuery, Pagination, Tool};
use agentdesk_store::{AgentsSlice, Lifecycle, OpKind, Slice, ToolsSlice};
use agentdesk_test_utils::assertions::{assert_absent, assert_unique_ids};
use agentdesk_test_utils::generators::*;
use proptest::prelude::*;

fn seeded_tools(items: Vec<Tool>) -> ToolsSlice {
    let mut slice = ToolsSlice::default();
    let query = ListQuery::default();
    let pagination = Pagination::derived(&query, items.len() as u64);
    slice.replace(items, pagination, query);
    slice
}

proptest! {
    #[test]
    fn fetch_list_replaces_items_and_pagination(
        before in arb_unique(arb_tool(), 12),
        after in arb_unique(arb_tool(), 12),
        query in arb_list_query(),
        pagination in arb_pagination(),
    ) {
        let mut slice = seeded_tools(before);
        slice.replace(after.clone(), pagination, query);
        prop_assert_eq!(&slice.items, &after);
        prop_assert_eq!(slice.pagination, pagination);
        prop_assert_eq!(slice.query, query);
    }

    #[test]
    fn delete_is_idempotent(items in arb_unique(arb_tool(), 12), id in arb_resource_id()) {
        let mut slice = seeded_tools(items.clone());
        slice.remove(&id);
        let once = slice.items.clone();
        slice.remove(&id);
        prop_assert_eq!(&slice.items, &once);
        assert_absent(&slice.items, &id);

        // Everything else keeps its order.
        let expected: Vec<_> = items.into_iter().filter(|tool| tool.id != id).collect();
        prop_assert_eq!(once, expected);
    }

    #[test]
    fn create_keeps_ids_unique(items in arb_unique(arb_tool(), 12), created in arb_tool()) {
        let mut slice = seeded_tools(items.clone());
        slice.append(created.clone());
        assert_unique_ids(&slice.items);
        prop_assert_eq!(slice.get(&created.id), Some(&created));
        if !items.iter().any(|tool| tool.id == created.id) {
            prop_assert_eq!(slice.items.last(), Some(&created));
            prop_assert_eq!(slice.items.len(), items.len() + 1);
        } else {
            prop_assert_eq!(slice.items.len(), items.len());
        }
    }

    #[test]
    fn update_overwrites_exactly_the_patched_fields(
        agent in arb_agent(),
        others in arb_unique(arb_agent(), 6),
        patch in arb_agent_patch(),
    ) {
        let others: Vec<Agent> = others.into_iter().filter(|other| other.id != agent.id).collect();
        let mut items = others.clone();
        items.push(agent.clone());

        let mut slice = AgentsSlice::default();
        slice.items = items;
        prop_assert!(slice.apply_patch(&agent.id, &patch));

        let updated = slice.get(&agent.id).unwrap();
        prop_assert_eq!(&updated.name, patch.name.as_ref().unwrap_or(&agent.name));
        prop_assert_eq!(&updated.description, patch.description.as_ref().unwrap_or(&agent.description));
        prop_assert_eq!(updated.visibility, patch.visibility.unwrap_or(agent.visibility));
        prop_assert_eq!(updated.status, patch.status.unwrap_or(agent.status));
        prop_assert_eq!(&updated.tool_ids, patch.tool_ids.as_ref().unwrap_or(&agent.tool_ids));
        prop_assert_eq!(updated.id.clone(), agent.id.clone());

        // Other entities are untouched.
        let rest: Vec<Agent> = slice.items.iter().filter(|a| a.id != agent.id).cloned().collect();
        prop_assert_eq!(rest, others);
    }

    #[test]
    fn rejection_leaves_items_untouched(items in arb_unique(arb_tool(), 12), message in "[a-z ]{1,30}") {
        let mut slice = seeded_tools(items.clone());
        let ticket = slice.lifecycle_mut().begin(OpKind::Delete);
        slice.lifecycle_mut().reject(ticket, message.clone());
        prop_assert_eq!(&slice.items, &items);
        prop_assert_eq!(slice.error(), Some(message.as_str()));
        prop_assert!(!slice.loading());
    }

    #[test]
    fn loading_settles_once_every_operation_settles(outcomes in prop::collection::vec(0u8..3, 1..12)) {
        let mut lifecycle = Lifecycle::new();
        let tickets: Vec<_> = outcomes.iter().map(|_| lifecycle.begin(OpKind::FetchList)).collect();
        prop_assert!(lifecycle.loading());
        for (ticket, outcome) in tickets.into_iter().zip(&outcomes) {
            match outcome {
                0 => lifecycle.fulfil(ticket),
                1 => lifecycle.reject(ticket, "failed"),
                _ => lifecycle.abandon(ticket),
            }
        }
        prop_assert!(!lifecycle.loading());
        prop_assert_eq!(lifecycle.pending(), 0);
    }
}

