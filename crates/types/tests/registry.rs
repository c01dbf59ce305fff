use arrowlog_types::archetypes::{AnnotationContext, InstancePoses3D};
use arrowlog_types::array::{CodecError, Descriptor, ScalarType};
use arrowlog_types::components::{KeypointIds, PoseRotationAxisAngle, Text};
use arrowlog_types::{archetype_descriptor_for, descriptor_for, lookup, lookup_archetype, Archetype, Component};
use std::sync::Arc;


#[test]
fn concurrent_first_use_yields_one_descriptor() {
    let descriptors = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(descriptor_for::<PoseRotationAxisAngle>))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>()
    });

    for desc in descriptors.iter() {
        assert!(Arc::ptr_eq(desc, &descriptors[0]));
    }
    assert!(Arc::ptr_eq(
        &descriptors[0],
        &lookup(PoseRotationAxisAngle::NAME).unwrap()
    ));
}


#[test]
fn descriptor_layout() {
    assert_eq!(
        KeypointIds::component_descriptor().descriptor().as_ref(),
        &Descriptor::list(ScalarType::UInt16.into(), false)
    );
    assert_eq!(
        PoseRotationAxisAngle::component_descriptor().descriptor().to_string(),
        "struct<axis: struct<x: Float32, y: Float32, z: Float32>, angle: Float32>"
    );
    assert!(lookup("arrowlog.components.Unknown").is_none());
}


#[test]
fn validate_checks_the_datatype() {
    let desc = Text::component_descriptor();
    let strings = arrow::array::StringArray::from(vec!["a"]);
    let ints = arrow::array::UInt16Array::from(vec![1]);

    assert!(desc.validate(&strings).is_ok());
    assert!(matches!(desc.validate(&ints), Err(CodecError::DatatypeMismatch { .. })));
}


#[test]
fn archetype_table_follows_declaration_order() {
    let desc = archetype_descriptor_for::<InstancePoses3D>();
    assert!(Arc::ptr_eq(&desc, &archetype_descriptor_for::<InstancePoses3D>()));

    assert_eq!(desc.name(), InstancePoses3D::NAME);
    assert_eq!(desc.indicator(), "arrowlog.components.InstancePoses3DIndicator");
    let names: Vec<_> = desc.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["translations", "rotation_axis_angles", "quaternions", "scales"]);
    assert_eq!(
        desc.field("scales").unwrap().component.name(),
        "arrowlog.components.PoseScale3D"
    );
}


#[test]
fn archetype_lookup_by_name() {
    let desc = archetype_descriptor_for::<AnnotationContext>();
    let found = lookup_archetype(AnnotationContext::NAME).unwrap();
    assert!(Arc::ptr_eq(&desc, &found));
    assert_eq!(found.fields().len(), 1);
    assert_eq!(found.field("context").unwrap().component.name(), "arrowlog.components.AnnotationContext");

    assert!(lookup_archetype("arrowlog.archetypes.Unknown").is_none());
    assert!(lookup_archetype("arrowlog.components.AnnotationContext").is_none());
}
