#![cfg(all(feature = "criterion-bench", feature = "memory-provider"))]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use erp_access::{
    AuthService, AuthSnapshot, MemoryProvider, Permission, Role, RouteGuard, default_menu,
    permissions_for, role_has_permission, visible_entries,
};
use futures::executor::block_on;

fn signed_in_snapshot(email: &str, password: &str) -> AuthSnapshot {
    let provider = MemoryProvider::new();
    provider.seed_demo_users().unwrap();
    let service = AuthService::new(provider);
    block_on(service.sign_in(email, password)).unwrap();
    service.state()
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.sample_size(30);
    group.throughput(Throughput::Elements(Permission::all().len() as u64));

    for role in [Role::SuperAdmin, Role::Accountant, Role::Viewer] {
        let id = BenchmarkId::new("full_permission_sweep", role.as_str());
        group.bench_with_input(id, &role, |b, role| {
            b.iter(|| {
                for permission in Permission::all() {
                    black_box(role_has_permission(*role, *permission));
                }
            });
        });
    }

    group.bench_function("permissions_for_all_roles", |b| {
        b.iter(|| {
            for role in Role::all() {
                black_box(permissions_for(*role).len());
            }
        });
    });

    group.finish();
}

fn bench_snapshot_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_reads");
    group.sample_size(30);
    group.throughput(Throughput::Elements(1));

    let snapshot = signed_in_snapshot("accountant@company.com", "accountant123");
    group.bench_function("has_permission", |b| {
        b.iter(|| black_box(snapshot.has_permission(Permission::AccountingEdit)));
    });
    group.bench_function("has_role", |b| {
        b.iter(|| black_box(snapshot.has_role([Role::Manager, Role::Accountant])));
    });

    let export_guard = RouteGuard::new().require_permission(Permission::ReportsExport);
    group.bench_function("guard_evaluate", |b| {
        b.iter(|| black_box(export_guard.evaluate(&snapshot)));
    });

    group.finish();
}

fn bench_menu_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_filter");
    group.sample_size(30);

    let menu = default_menu();
    group.throughput(Throughput::Elements(menu.len() as u64));

    for (email, password) in [
        ("admin@company.com", "admin123"),
        ("accountant@company.com", "accountant123"),
        ("viewer@company.com", "viewer123"),
    ] {
        let snapshot = signed_in_snapshot(email, password);
        let id = BenchmarkId::from_parameter(email);
        group.bench_with_input(id, &snapshot, |b, snapshot| {
            b.iter(|| black_box(visible_entries(&menu, snapshot.user())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry, bench_snapshot_reads, bench_menu_filter);
criterion_main!(benches);
