use combine_code::Config;
use combine_code::scanner::{ScanOptions, collect_sources};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn create_test_tree(dirs: usize, files_per_dir: usize) -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");

    for d in 0..dirs {
        let sub = root.join(format!("module_{d}"));
        let excluded = sub.join("node_modules/pkg");
        fs::create_dir_all(&excluded).unwrap();

        for f in 0..files_per_dir {
            let body = format!("export const value_{f} = {f};\n").repeat(20);
            fs::write(sub.join(format!("file_{f}.js")), &body).unwrap();
            fs::write(sub.join(format!("view_{f}.vue")), &body).unwrap();
            fs::write(sub.join(format!("notes_{f}.md")), &body).unwrap();
            fs::write(excluded.join(format!("dep_{f}.js")), &body).unwrap();
        }
    }

    dir
}

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.core.root = dir.join("project");
    config.core.output = dir.join("combined_code.txt");
    config
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for dirs in [10, 50] {
        let dir = create_test_tree(dirs, 10);
        let config = config_for(dir.path());
        let options = ScanOptions::from(&config);

        group.bench_with_input(BenchmarkId::from_parameter(dirs), &dirs, |b, _| {
            b.iter(|| collect_sources(black_box(&config.core.root), black_box(&options)).unwrap());
        });
    }

    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for dirs in [10, 50] {
        let dir = create_test_tree(dirs, 10);
        let config = config_for(dir.path());

        group.bench_with_input(BenchmarkId::from_parameter(dirs), &dirs, |b, _| {
            b.iter(|| combine_code::combine(black_box(config.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scan, bench_combine);
criterion_main!(benches);
