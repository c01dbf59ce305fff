use arrow::array::{Array, AsArray};
use arrowlog_types::array::{system_allocator, BuilderOptions, ColumnBuilder};
use arrowlog_types::codec::{fill, from_arrow};
use arrowlog_types::components::KeypointIds;
use arrowlog_types::datatypes::KeypointId;
use arrowlog_types::{Collection, Component};
use proptest::prelude::*;


fn keypoint_ids() -> impl Strategy<Value = KeypointIds> {
    prop_oneof![
        Just(KeypointIds(Collection::Unset)),
        prop::collection::vec(any::<u16>(), 0..6).prop_map(|ids| KeypointIds::from_iter(ids)),
    ]
}


fn build(records: &[KeypointIds], reserve: bool, options: BuilderOptions) -> arrow::array::ArrayRef {
    let desc = KeypointIds::component_descriptor();
    let mut builder = ColumnBuilder::new(desc.descriptor().clone(), &system_allocator())
        .unwrap()
        .with_options(options);
    if reserve {
        builder.reserve(records.len()).unwrap();
    }
    fill(&mut builder, records, records.len()).unwrap();
    builder.finish().unwrap()
}


proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn counts_match_the_records(records in prop::collection::vec(keypoint_ids(), 0..40)) {
        let array = build(&records, true, BuilderOptions::default());
        let list = array.as_list::<i32>();

        let nested: usize = records.iter().map(|r| r.0.len()).sum();
        prop_assert_eq!(list.len(), records.len());
        prop_assert_eq!(list.values().len(), nested);
        prop_assert_eq!(list.null_count(), 0);
    }

    #[test]
    fn reservation_is_idempotent(
        records in prop::collection::vec(keypoint_ids(), 0..40),
        hint in 0..5usize
    ) {
        let plain = build(&records, false, BuilderOptions::default());
        let reserved = build(&records, true, BuilderOptions { list_len_hint: hint });
        prop_assert_eq!(plain.to_data(), reserved.to_data());
    }

    #[test]
    fn decode_recovers_the_values(records in prop::collection::vec(keypoint_ids(), 0..40)) {
        let array = build(&records, true, BuilderOptions::default());
        let decoded = from_arrow::<KeypointIds>(array.as_ref()).unwrap();

        prop_assert_eq!(decoded.len(), records.len());
        for (have, want) in decoded.iter().zip(records.iter()) {
            let want: Vec<KeypointId> = want.0.iter().copied().collect();
            prop_assert_eq!(have.0.iter().copied().collect::<Vec<_>>(), want);
            prop_assert!(have.0.is_set());
        }
    }
}
