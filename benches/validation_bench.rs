//! Criterion benchmarks for assignment validation.
//!
//! Uses synthetic shops of growing size to measure the cost of one drag
//! update (fast path) and one drop (full report).

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use press_schedule::models::{
    InternalDuration, Job, OperatingSchedule, PlatesStatus, ProofApproval, Station, StationGroup,
    Task, TaskAssignment, TimeSlot,
};
use press_schedule::{
    is_valid_assignment, validate_assignment, validate_assignments, ProposedAssignment, Snapshot,
};

// ===========================================================================
// Synthetic shop: `stations` presses in one group, `jobs` jobs of 4 tasks,
// the first three of every job already placed back to back
// ===========================================================================

const TASKS_PER_JOB: usize = 4;

fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 13, 6, 0, 0).unwrap()
}

fn build_shop(stations: usize, jobs: usize) -> Snapshot {
    let exit = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let ceiling = stations as u32 / 2 + 1;
    let mut snapshot = Snapshot::new().with_group(StationGroup::new("presses", ceiling));

    for s in 0..stations {
        snapshot = snapshot.with_station(
            Station::new(format!("s{s}"), "presses")
                .with_schedule(OperatingSchedule::every_day(vec![TimeSlot::new(0, 24 * 60)])),
        );
    }

    for j in 0..jobs {
        let station = format!("s{}", j % stations);
        let mut job = Job::new(format!("j{j}"), exit)
            .with_proof(ProofApproval::not_required())
            .with_plates(PlatesStatus::Done);
        let mut cursor = monday() + Duration::hours(j as i64);

        for k in 0..TASKS_PER_JOB {
            let id = format!("j{j}-t{k}");
            job = job.with_task(id.clone());
            snapshot = snapshot.with_task(Task::internal(
                id.clone(),
                format!("j{j}"),
                k as i32,
                station.clone(),
                InternalDuration::new(10, 20),
            ));
            if k + 1 < TASKS_PER_JOB {
                let end = cursor + Duration::minutes(30);
                snapshot = snapshot.with_assignment(TaskAssignment::new(
                    format!("a-{id}"),
                    id,
                    station.clone(),
                    cursor,
                    end,
                ));
                cursor = end;
            }
        }
        snapshot = snapshot.with_job(job);
    }
    snapshot
}

fn last_task_proposal(jobs: usize, stations: usize) -> ProposedAssignment {
    let j = jobs / 2;
    ProposedAssignment::on_station(
        format!("j{j}-t{}", TASKS_PER_JOB - 1),
        format!("s{}", j % stations),
        monday() + Duration::hours(j as i64) + Duration::minutes(75),
    )
}

// ===========================================================================
// Benchmarks
// ===========================================================================

const SIZES: [(usize, usize); 3] = [(5, 50), (20, 500), (50, 2000)];

fn bench_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_valid_assignment");

    for (stations, jobs) in SIZES {
        let snapshot = build_shop(stations, jobs);
        let proposed = last_task_proposal(jobs, stations);
        group.bench_with_input(
            BenchmarkId::new(format!("s{}", stations), jobs),
            &(snapshot, proposed),
            |b, (s, p)| b.iter(|| is_valid_assignment(black_box(p), black_box(s))),
        );
    }
    group.finish();
}

fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_assignment");

    for (stations, jobs) in SIZES {
        let snapshot = build_shop(stations, jobs);
        let proposed = last_task_proposal(jobs, stations);
        group.bench_with_input(
            BenchmarkId::new(format!("s{}", stations), jobs),
            &(snapshot, proposed),
            |b, (s, p)| {
                b.iter(|| {
                    let result = validate_assignment(black_box(p), black_box(s));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_assignments");
    group.sample_size(10);

    for &jobs in &[50usize, 500] {
        let stations = 10;
        let snapshot = build_shop(stations, jobs);
        let proposals: Vec<ProposedAssignment> = (0..jobs)
            .map(|j| {
                ProposedAssignment::on_station(
                    format!("j{j}-t{}", TASKS_PER_JOB - 1),
                    format!("s{}", j % stations),
                    monday() + Duration::hours(j as i64) + Duration::minutes(90),
                )
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(jobs),
            &(snapshot, proposals),
            |b, (s, p)| {
                b.iter(|| {
                    let results = validate_assignments(black_box(p), black_box(s));
                    black_box(results)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fast_path, bench_full_report, bench_batch);
criterion_main!(benches);
