use arrow::array::{Array, ArrayRef, AsArray, Float32Array, StructArray};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field, UInt16Type, UInt32Type};
use arrowlog_types::array::{system_allocator, AllocationError, AllocatorRef, BuilderOptions, CodecError, ColumnBuilder, Descriptor, ScalarType};
use arrowlog_types::codec::{fill, from_arrow, to_arrow, to_arrow_with};
use arrowlog_types::components::{AnnotationContext, KeypointIds, PoseTranslation3D, Text};
use arrowlog_types::datatypes::{AnnotationInfo, ClassDescriptionMapElem, ClassId, KeypointId};
use arrowlog_types::{Collection, Component};
use std::sync::Arc;


arrowlog_types::component! {
    Confidence(Option<f32>) : "arrowlog.components.Confidence"
}


arrowlog_types::component! {
    Aliases(Option<Collection<String>>) : "arrowlog.components.Aliases"
}


arrowlog_types::arrow_struct! {
    Detection : "arrowlog.datatypes.Detection" {
        class_id: u16,
        score: Option<f32>,
    }
}


arrowlog_types::component! {
    Detections(Collection<Option<Detection>>) : "arrowlog.components.Detections"
}


fn classes() -> Vec<ClassDescriptionMapElem> {
    vec![
        (0u16, "background").into(),
        ClassDescriptionMapElem {
            class_id: ClassId(1),
            info: AnnotationInfo::new(1, "person").with_rgb(255, 0, 0)
        },
        (7u16, "dog").into(),
    ]
}


fn contexts() -> Vec<AnnotationContext> {
    vec![
        AnnotationContext::new(classes()),
        AnnotationContext::default(),
        AnnotationContext::new(Vec::<ClassDescriptionMapElem>::new()),
        AnnotationContext::new(classes().into_iter().take(1)),
    ]
}


#[test]
fn zero_records() -> anyhow::Result<()> {
    let array = to_arrow::<AnnotationContext>(&[], &system_allocator())?;
    assert_eq!(array.len(), 0);
    assert_eq!(array.data_type(), AnnotationContext::component_descriptor().data_type());
    Ok(())
}


#[test]
fn list_of_struct_layout() -> anyhow::Result<()> {
    let array = to_arrow(&contexts(), &system_allocator())?;
    let list = array.as_list::<i32>();

    assert_eq!(list.len(), 4);
    assert_eq!(list.null_count(), 0);
    assert_eq!(list.value_offsets(), &[0, 3, 3, 3, 4]);

    let elems = list.values().as_struct();
    assert_eq!(elems.len(), 4);
    let class_ids = elems.column_by_name("class_id").unwrap().as_primitive::<UInt16Type>();
    assert_eq!(class_ids.values().as_ref(), &[0, 1, 7, 0]);

    let info = elems.column_by_name("info").unwrap().as_struct();
    let labels = info.column_by_name("label").unwrap().as_string::<i32>();
    assert_eq!(labels.value(1), "person");
    let colors = info.column_by_name("color").unwrap().as_primitive::<UInt32Type>();
    assert_eq!(colors.value(1), 0xff0000ff);
    Ok(())
}


#[test]
fn round_trip_distinguishes_unset_and_empty_only_by_slot_length() -> anyhow::Result<()> {
    let records = contexts();
    let array = to_arrow(&records, &system_allocator())?;
    let decoded: Vec<AnnotationContext> = from_arrow(array.as_ref())?;

    assert_eq!(decoded[0], records[0]);
    assert_eq!(decoded[1].class_map, Collection::Empty);
    assert_eq!(decoded[2].class_map, Collection::Empty);
    assert_eq!(decoded[3], records[3]);
    Ok(())
}


#[test]
fn scalar_components() -> anyhow::Result<()> {
    let allocator = system_allocator();

    let texts = vec![Text::from("a"), Text::from(""), Text::from("ünïcode")];
    let array = to_arrow(&texts, &allocator)?;
    assert_eq!(array.data_type(), &DataType::Utf8);
    assert_eq!(from_arrow::<Text>(array.as_ref())?, texts);

    let ids = vec![
        KeypointIds::from_iter([1, 2, 3]),
        KeypointIds(Collection::Unset),
        KeypointIds::from_iter([9]),
    ];
    let array = to_arrow(&ids, &allocator)?;
    let list = array.as_list::<i32>();
    assert_eq!(list.values().len(), 4);
    let decoded = from_arrow::<KeypointIds>(array.as_ref())?;
    assert_eq!(decoded[2].0.as_slice(), Some(&[KeypointId(9)][..]));
    Ok(())
}


#[test]
fn fill_rejects_count_past_the_end() -> anyhow::Result<()> {
    let desc = AnnotationContext::component_descriptor();
    let mut builder = ColumnBuilder::new(desc.descriptor().clone(), &system_allocator())?;

    let err = fill(&mut builder, &contexts(), 5).unwrap_err();
    assert!(matches!(err, CodecError::InvalidArgument(_)));

    fill(&mut builder, &contexts(), 2)?;
    assert_eq!(builder.len(), 2);
    Ok(())
}


#[test]
fn fill_rejects_foreign_builder() -> anyhow::Result<()> {
    let descriptor = Arc::new(Descriptor::list(ScalarType::UInt16.into(), false));
    let mut builder = ColumnBuilder::new(descriptor, &system_allocator())?;

    let err = fill(&mut builder, &contexts(), 1).unwrap_err();
    assert!(matches!(err, CodecError::InvalidArgument(_)));
    assert_eq!(builder.len(), 0);
    Ok(())
}


#[test]
fn fill_counts_only_requested_records() -> anyhow::Result<()> {
    let desc = AnnotationContext::component_descriptor();
    let mut builder = ColumnBuilder::new(desc.descriptor().clone(), &system_allocator())?;
    fill(&mut builder, &contexts(), 1)?;

    let array = builder.finish()?;
    let list = array.as_list::<i32>();
    assert_eq!(list.len(), 1);
    assert_eq!(list.values().len(), 3);
    Ok(())
}


#[test]
fn builder_options_do_not_change_output() -> anyhow::Result<()> {
    let allocator = system_allocator();
    let plain = to_arrow(&contexts(), &allocator)?;
    let tuned = to_arrow_with(&contexts(), &allocator, &BuilderOptions { list_len_hint: 0 })?;
    assert_eq!(plain.to_data(), tuned.to_data());
    Ok(())
}


#[test]
fn decode_reports_datatype_mismatch() {
    let array = Float32Array::from(vec![1.0, 2.0]);
    let err = from_arrow::<PoseTranslation3D>(&array).unwrap_err();
    assert!(matches!(err, CodecError::DatatypeMismatch { .. }));
}


#[test]
fn decode_reports_missing_values_with_context() {
    let column = || Arc::new(Float32Array::from(vec![1.0, 2.0])) as ArrayRef;
    let array = StructArray::new(
        vec![
            Field::new("x", DataType::Float32, false),
            Field::new("y", DataType::Float32, false),
            Field::new("z", DataType::Float32, false),
        ].into(),
        vec![column(), column(), column()],
        Some(NullBuffer::from(vec![true, false]))
    );

    let err = from_arrow::<PoseTranslation3D>(&array).unwrap_err();
    assert!(matches!(err.root(), CodecError::MissingData(_)));
    assert!(err.to_string().starts_with(
        "arrowlog.components.PoseTranslation3D: arrowlog.datatypes.Vec3D: missing data"
    ));
}


#[test]
fn allocation_failure_propagates() {
    let allocator: AllocatorRef = Arc::new(arrowlog_types::array::LimitedAllocator::new(256));
    let texts: Vec<Text> = (0..1000).map(|i| Text(format!("label #{i}"))).collect();
    let err = to_arrow(&texts, &allocator).unwrap_err();
    assert!(matches!(err, CodecError::AllocationFailure(_)));
}


#[test]
fn optional_scalars_round_trip() -> anyhow::Result<()> {
    let records = vec![Confidence(Some(0.5)), Confidence(None), Confidence(Some(1.0))];
    let array = to_arrow(&records, &system_allocator())?;

    assert_eq!(array.data_type(), &DataType::Float32);
    assert_eq!(array.null_count(), 1);
    assert!(array.is_null(1));
    assert_eq!(from_arrow::<Confidence>(array.as_ref())?, records);
    Ok(())
}


#[test]
fn optional_list_slots_are_null() -> anyhow::Result<()> {
    let records = vec![
        Aliases(Some(Collection::from(vec!["person".to_string()]))),
        Aliases(None),
        Aliases(Some(Collection::Empty)),
    ];
    let array = to_arrow(&records, &system_allocator())?;

    let list = array.as_list::<i32>();
    assert_eq!(list.value_offsets(), &[0, 1, 1, 1]);
    assert!(list.is_null(1));
    assert!(list.is_valid(2));
    assert_eq!(from_arrow::<Aliases>(array.as_ref())?, records);
    Ok(())
}


#[test]
fn nullable_struct_items_and_fields() -> anyhow::Result<()> {
    let records = vec![
        Detections(Collection::from(vec![
            Some(Detection { class_id: 1, score: Some(0.9) }),
            None,
            Some(Detection { class_id: 2, score: None }),
        ])),
        Detections(Collection::Unset),
    ];
    let array = to_arrow(&records, &system_allocator())?;

    let DataType::List(item) = array.data_type() else {
        panic!("expected a list column")
    };
    assert!(item.is_nullable());

    let elems = array.as_list::<i32>().values().as_struct();
    assert_eq!(elems.len(), 3);
    assert_eq!(elems.null_count(), 1);
    let score = elems.column_by_name("score").unwrap();
    assert_eq!(score.null_count(), 2);

    let decoded = from_arrow::<Detections>(array.as_ref())?;
    assert_eq!(decoded[0], records[0]);
    assert_eq!(decoded[1].0, Collection::Empty);
    Ok(())
}


#[test]
fn oversized_list_hint_is_an_allocation_failure() {
    let records = vec![KeypointIds::from_iter([1, 2])];
    let options = BuilderOptions { list_len_hint: usize::MAX };

    let err = to_arrow_with(&records, &system_allocator(), &options).unwrap_err();
    assert!(matches!(err, CodecError::AllocationFailure(e) if e == AllocationError::overflow()));
}
