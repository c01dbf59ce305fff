use arrowlog_types::archetypes::InstancePoses3D;
use arrowlog_types::array::system_allocator;
use arrowlog_types::codec::to_arrow;
use arrowlog_types::components::AnnotationContext;
use arrowlog_types::datatypes::{AnnotationInfo, ClassDescriptionMapElem};
use arrowlog_types::serialize;
use criterion::{black_box, criterion_group, criterion_main, Criterion};


fn annotation_contexts(n: usize) -> Vec<AnnotationContext> {
    (0..n).map(|i| {
        AnnotationContext::new((0..(i % 8) as u16).map(|id| {
            ClassDescriptionMapElem::from(
                AnnotationInfo::new(id, format!("class #{}", id)).with_rgb(id as u8, 0, 255)
            )
        }))
    }).collect()
}


fn codec_setup(c: &mut Criterion) {
    let allocator = system_allocator();
    let records = annotation_contexts(10_000);

    c.bench_function("list of struct: 10k annotation contexts", |bench| {
        bench.iter(|| {
            to_arrow(black_box(&records), &allocator).expect("serialization failed")
        })
    });

    let poses = InstancePoses3D::new()
        .with_translations((0..10_000).map(|i| [i as f32, 0.0, 0.0]))
        .with_scales((0..10_000).map(|i| i as f32));

    c.bench_function("instance poses: 10k instances", |bench| {
        bench.iter(|| {
            serialize(black_box(&poses), &allocator).expect("serialization failed")
        })
    });
}


criterion_group!(codec, codec_setup);
criterion_main!(codec);
