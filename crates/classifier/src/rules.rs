//! Classification rules.
//!
//! Each rule maps one raw record to at most one event. Rules read nothing
//! but their arguments, so classifying the same record twice yields the
//! same events.

use render_events::{
    LargeDomUpdateEvent, LayoutShiftEvent, MutationKind, ReflowEvent, RenderEvent, RepaintEvent, NOT_AVAILABLE,
};

use crate::allow_list::RepaintAllowList;
use crate::record::{MutationRecord, PerformanceEntry};
use crate::style::ComputedStyle;

/// A child-list mutation adding more nodes than this is a large DOM update.
pub const LARGE_DOM_UPDATE_THRESHOLD: usize = 20;

/// Every mutation is a reflow.
pub fn reflow(record: &MutationRecord) -> RenderEvent {
    ReflowEvent::new(record.target.tag.as_str(), record.target.details(), record.kind).into()
}

/// An attribute mutation on an allow-listed property is a repaint.
///
/// The computed value is read from `styles` now; a detached target gets
/// the sentinel.
pub fn repaint<S>(record: &MutationRecord, allow_list: &RepaintAllowList, styles: &S) -> Option<RenderEvent>
where
    S: ComputedStyle + ?Sized,
{
    if record.kind != MutationKind::Attributes {
        return None;
    }

    let property = record.attribute_name.as_deref()?;
    if !allow_list.contains(property) {
        return None;
    }

    let computed_value = styles
        .property_value(record.target.node, property)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Some(
        RepaintEvent::new(
            record.target.tag.as_str(),
            record.target.details(),
            property,
            computed_value,
        )
        .into(),
    )
}

/// A child-list mutation adding more than [`LARGE_DOM_UPDATE_THRESHOLD`] nodes.
pub fn large_dom_update(record: &MutationRecord) -> Option<RenderEvent> {
    if record.kind != MutationKind::ChildList || record.added_nodes <= LARGE_DOM_UPDATE_THRESHOLD {
        return None;
    }

    Some(LargeDomUpdateEvent::new(record.target.tag.as_str(), record.added_nodes).into())
}

/// Apply all three mutation rules, in order: reflow, repaint, large update.
pub fn classify_mutation<S>(record: &MutationRecord, allow_list: &RepaintAllowList, styles: &S) -> Vec<RenderEvent>
where
    S: ComputedStyle + ?Sized,
{
    let mut events = vec![reflow(record)];
    events.extend(repaint(record, allow_list, styles));
    events.extend(large_dom_update(record));
    events
}

/// A layout-shift timeline entry is a layout shift; anything else is ignored.
pub fn layout_shift(entry: &PerformanceEntry) -> Option<RenderEvent> {
    if !entry.is_layout_shift() {
        return None;
    }

    let affected = entry.sources.first().and_then(|source| source.node_name.as_deref());
    Some(LayoutShiftEvent::new(affected, entry.value).into())
}

/// Classify a batch of timeline entries, keeping entry order.
pub fn classify_entries(entries: &[PerformanceEntry]) -> Vec<RenderEvent> {
    entries.iter().filter_map(layout_shift).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow_list::REPAINT_PROPERTIES;
    use crate::record::{ElementSnapshot, LayoutShiftSource, NodeId};
    use crate::style::StyleTable;
    use proptest::prelude::*;
    use render_events::{RenderEventKind, UNKNOWN_ELEMENT};

    fn kinds(events: &[RenderEvent]) -> Vec<RenderEventKind> {
        events.iter().map(RenderEvent::kind).collect()
    }

    fn span_btn() -> ElementSnapshot {
        ElementSnapshot::new(NodeId(2), "SPAN").with_class("btn")
    }

    #[test]
    fn test_large_update_scenario() {
        let list = ElementSnapshot::new(NodeId(1), "DIV").with_id("list");
        let record = MutationRecord::child_list(list, 25, 0);

        let events = classify_mutation(&record, RepaintAllowList::standard(), &StyleTable::new());
        assert_eq!(kinds(&events), vec![RenderEventKind::Reflow, RenderEventKind::LargeDomUpdate]);

        match &events[0] {
            RenderEvent::Reflow(reflow) => {
                assert_eq!(reflow.change_type(), MutationKind::ChildList);
                assert_eq!(reflow.element_details().id(), "list");
                assert_eq!(reflow.element_details().classes(), "N/A");
            }
            other => panic!("expected reflow, got {other:?}"),
        }
        match &events[1] {
            RenderEvent::LargeDomUpdate(update) => {
                assert_eq!(update.target_element(), "DIV");
                assert_eq!(update.added_nodes_count(), 25);
            }
            other => panic!("expected large update, got {other:?}"),
        }
    }

    #[test]
    fn test_repaint_scenario() {
        let styles = StyleTable::new().with(NodeId(2), "background-color", "rgb(0, 128, 0)");
        let record = MutationRecord::attribute(span_btn(), "background-color");

        let events = classify_mutation(&record, RepaintAllowList::standard(), &styles);
        assert_eq!(kinds(&events), vec![RenderEventKind::Reflow, RenderEventKind::Repaint]);

        match &events[1] {
            RenderEvent::Repaint(repaint) => {
                assert_eq!(repaint.target_element(), "SPAN");
                assert_eq!(repaint.element_details().classes(), "btn");
                assert_eq!(repaint.changed_attribute(), "background-color");
                assert_eq!(repaint.computed_value(), "rgb(0, 128, 0)");
            }
            other => panic!("expected repaint, got {other:?}"),
        }
    }

    #[test]
    fn test_repaint_on_removed_element_uses_sentinel() {
        let mut styles = StyleTable::new().with(NodeId(2), "opacity", "0.4");
        styles.remove_node(NodeId(2));

        let record = MutationRecord::attribute(span_btn(), "opacity");
        match repaint(&record, RepaintAllowList::standard(), &styles) {
            Some(RenderEvent::Repaint(repaint)) => assert_eq!(repaint.computed_value(), NOT_AVAILABLE),
            other => panic!("expected repaint, got {other:?}"),
        }
    }

    #[test]
    fn test_repaint_requires_attribute_name() {
        let mut record = MutationRecord::attribute(span_btn(), "opacity");
        record.attribute_name = None;
        assert_eq!(repaint(&record, RepaintAllowList::standard(), &StyleTable::new()), None);
    }

    #[test]
    fn test_child_list_never_repaints() {
        let mut record = MutationRecord::child_list(span_btn(), 3, 0);
        record.attribute_name = Some("opacity".to_string());
        assert_eq!(repaint(&record, RepaintAllowList::standard(), &StyleTable::new()), None);
    }

    #[test]
    fn test_large_update_boundary() {
        let at = MutationRecord::child_list(span_btn(), LARGE_DOM_UPDATE_THRESHOLD, 0);
        let over = MutationRecord::child_list(span_btn(), LARGE_DOM_UPDATE_THRESHOLD + 1, 0);
        assert_eq!(large_dom_update(&at), None);
        assert!(large_dom_update(&over).is_some());
    }

    #[test]
    fn test_layout_shift_scenario() {
        let entry = PerformanceEntry::layout_shift(0.15, Vec::new());
        match layout_shift(&entry) {
            Some(RenderEvent::LayoutShift(shift)) => {
                assert_eq!(shift.affected_element(), UNKNOWN_ELEMENT);
                assert_eq!(shift.impact(), 0.15);
            }
            other => panic!("expected layout shift, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_shift_uses_first_source() {
        let entry = PerformanceEntry::layout_shift(
            0.02,
            vec![LayoutShiftSource::node("IMG"), LayoutShiftSource::node("P")],
        );
        assert_eq!(layout_shift(&entry).map(|e| e.element().to_string()), Some("IMG".to_string()));

        let detached = PerformanceEntry::layout_shift(0.02, vec![LayoutShiftSource::default()]);
        assert_eq!(
            layout_shift(&detached).map(|e| e.element().to_string()),
            Some(UNKNOWN_ELEMENT.to_string())
        );
    }

    #[test]
    fn test_layout_shift_missing_value_is_zero() {
        let mut entry = PerformanceEntry::layout_shift(0.0, Vec::new());
        entry.value = None;
        match layout_shift(&entry) {
            Some(RenderEvent::LayoutShift(shift)) => assert_eq!(shift.impact(), 0.0),
            other => panic!("expected layout shift, got {other:?}"),
        }
    }

    #[test]
    fn test_other_entry_types_filtered() {
        let entries = vec![
            PerformanceEntry::other("paint"),
            PerformanceEntry::layout_shift(0.1, Vec::new()),
            PerformanceEntry::other("largest-contentful-paint"),
        ];
        assert_eq!(kinds(&classify_entries(&entries)), vec![RenderEventKind::LayoutShift]);
    }

    fn listed_property() -> impl Strategy<Value = String> {
        prop::sample::select(REPAINT_PROPERTIES.to_vec()).prop_map(str::to_string)
    }

    fn unlisted_property() -> impl Strategy<Value = String> {
        "[a-z][a-z-]{0,15}".prop_filter("must not be allow-listed", |p| !RepaintAllowList::standard().contains(p))
    }

    proptest! {
        #[test]
        fn prop_listed_attribute_yields_reflow_and_repaint(property in listed_property()) {
            let record = MutationRecord::attribute(span_btn(), &property);
            let events = classify_mutation(&record, RepaintAllowList::standard(), &StyleTable::new());
            prop_assert_eq!(kinds(&events), vec![RenderEventKind::Reflow, RenderEventKind::Repaint]);
        }

        #[test]
        fn prop_unlisted_attribute_yields_only_reflow(property in unlisted_property()) {
            let record = MutationRecord::attribute(span_btn(), &property);
            let events = classify_mutation(&record, RepaintAllowList::standard(), &StyleTable::new());
            prop_assert_eq!(kinds(&events), vec![RenderEventKind::Reflow]);
        }

        #[test]
        fn prop_large_update_iff_over_threshold(added in 0usize..200) {
            let record = MutationRecord::child_list(span_btn(), added, 0);
            let events = classify_mutation(&record, RepaintAllowList::standard(), &StyleTable::new());
            let has_large = events.iter().any(|e| e.kind() == RenderEventKind::LargeDomUpdate);
            prop_assert_eq!(has_large, added > LARGE_DOM_UPDATE_THRESHOLD);
        }

        #[test]
        fn prop_sourceless_shift_keeps_value(value in 0.0f64..10.0) {
            let entry = PerformanceEntry::layout_shift(value, Vec::new());
            let event = layout_shift(&entry);
            prop_assert_eq!(event, Some(LayoutShiftEvent::new(Some(UNKNOWN_ELEMENT), Some(value)).into()));
        }

        #[test]
        fn prop_classification_is_repeatable(property in listed_property(), added in 0usize..50) {
            let styles = StyleTable::new().with(NodeId(2), &property, "initial");
            let attribute = MutationRecord::attribute(span_btn(), &property);
            let child_list = MutationRecord::child_list(span_btn(), added, 1);

            for record in [attribute, child_list] {
                let first = classify_mutation(&record, RepaintAllowList::standard(), &styles);
                let second = classify_mutation(&record, RepaintAllowList::standard(), &styles);
                prop_assert_eq!(first, second);
            }
        }
    }
}
