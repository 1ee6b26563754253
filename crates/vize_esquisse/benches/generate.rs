use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vize_esquisse::{
    array_type, generate_preview_sources, generate_value, function_type, named_type, object_type,
    optional_type, record_type, union_type, CollectedType, CollectedTypes, GenerateOptions,
    ObjectField, BOOLEAN_TYPE, NULL_TYPE, NUMBER_TYPE, STRING_TYPE, VOID_TYPE,
};

fn dictionary(width: usize) -> CollectedTypes {
    let mut types = CollectedTypes::default();
    for i in 0..width {
        let next = format!("Node{}", (i + 1) % width);
        types.insert(
            format!("Node{i}"),
            CollectedType::new(object_type(vec![
                ObjectField::required("id", NUMBER_TYPE),
                ObjectField::required("label", STRING_TYPE),
                ObjectField::optional("hidden", BOOLEAN_TYPE),
                ObjectField::required("next", named_type(next.as_str())),
                ObjectField::required("children", array_type(named_type(format!("Node{i}")))),
                ObjectField::required("meta", record_type(STRING_TYPE, named_type(format!("Node{i}")))),
                ObjectField::required("parent", union_type(vec![named_type(next.as_str()), NULL_TYPE])),
                ObjectField::required("onSelect", optional_type(function_type(VOID_TYPE))),
            ])),
        );
    }
    types
}

fn bench_generate(c: &mut Criterion) {
    let types = dictionary(8);
    let root = named_type("Node0");

    c.bench_function("generate_value_cyclic", |b| {
        b.iter(|| generate_value(black_box(&root), black_box(&types), &GenerateOptions::default()))
    });

    c.bench_function("generate_value_random", |b| {
        b.iter(|| generate_value(black_box(&root), black_box(&types), &GenerateOptions::random(Some(7))))
    });

    c.bench_function("generate_preview_sources", |b| {
        b.iter(|| generate_preview_sources(black_box(&root), black_box(&types), &[]))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
