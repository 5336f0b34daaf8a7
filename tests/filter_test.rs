//! Job filtering over realistic listings.

use jobboard::app::filter::{filter_jobs, highlight_ranges, JobFilter};
use jobboard::domain::{Category, Job, JobType};

fn job(id: &str, name: &str, location: &str, job_type: JobType, category: Category, verified: bool) -> Job {
    Job {
        id: id.to_string(),
        name: name.to_string(),
        job_type,
        category,
        location: location.to_string(),
        description: "Description".to_string(),
        salary_range: "40000-60000".to_string(),
        company_name: "Acme".to_string(),
        is_available: true,
        verified,
        image_url: None,
        posted_by: None,
        created_at: None,
    }
}

fn listings() -> Vec<Job> {
    vec![
        job("1", "Backend Developer", "Berlin", JobType::FullTime, Category::Technology, true),
        job("2", "Night Nurse", "Oslo", JobType::Contract, Category::Healthcare, true),
        job("3", "Accountant", "Berlin", JobType::Contract, Category::Finance, false),
        job("4", "Math Tutor", "Lisbon", JobType::PartTime, Category::Education, true),
        job("5", "Data Intern", "Remote", JobType::Internship, Category::Technology, true),
    ]
}

fn ids(jobs: &[&Job]) -> Vec<String> {
    jobs.iter().map(|j| j.id.clone()).collect()
}

#[test]
fn empty_filter_yields_verified_jobs_in_order() {
    let jobs = listings();
    let result = filter_jobs(&jobs, &JobFilter::default());
    assert_eq!(ids(&result), vec!["1", "2", "4", "5"]);
}

#[test]
fn type_filter_is_exact() {
    let jobs = listings();
    let filter = JobFilter {
        job_type: Some(JobType::Contract),
        ..JobFilter::default()
    };
    let result = filter_jobs(&jobs, &filter);
    assert_eq!(ids(&result), vec!["2"]);
    assert!(result.iter().all(|j| j.job_type == JobType::Contract && j.verified));
}

#[test]
fn query_matches_name_or_location_case_insensitively() {
    let jobs = listings();
    let by_location = JobFilter {
        query: "BERLIN".to_string(),
        ..JobFilter::default()
    };
    assert_eq!(ids(&filter_jobs(&jobs, &by_location)), vec!["1"]);

    let by_name = JobFilter {
        query: "tutor".to_string(),
        ..JobFilter::default()
    };
    assert_eq!(ids(&filter_jobs(&jobs, &by_name)), vec!["4"]);
}

#[test]
fn all_criteria_combine() {
    let jobs = listings();
    let filter = JobFilter {
        query: "data".to_string(),
        job_type: Some(JobType::Internship),
        category: Some(Category::Technology),
    };
    assert_eq!(ids(&filter_jobs(&jobs, &filter)), vec!["5"]);

    let filter = JobFilter {
        category: Some(Category::Finance),
        ..JobFilter::default()
    };
    assert!(filter_jobs(&jobs, &filter).is_empty());
}

#[test]
fn output_is_always_a_verified_subset() {
    let jobs = listings();
    let queries = ["", "e", "n", "zzz"];
    let types = [None, Some(JobType::FullTime), Some(JobType::Contract)];
    let categories = [None, Some(Category::Technology), Some(Category::Finance)];

    for query in queries {
        for job_type in types {
            for category in categories {
                let filter = JobFilter {
                    query: query.to_string(),
                    job_type,
                    category,
                };
                let result = filter_jobs(&jobs, &filter);
                assert!(result.len() <= jobs.len());
                assert!(result.iter().all(|j| j.verified));
            }
        }
    }
}

#[test]
fn highlight_ranges_are_char_based() {
    assert_eq!(highlight_ranges("Zürich Zürich", "zü"), vec![(0, 2), (7, 9)]);
    assert!(highlight_ranges("Oslo", "").is_empty());
}

#[test]
fn highlights_exist_exactly_when_the_query_matches() {
    let jobs = vec![
        job("1", "Tour Guide", "İzmir", JobType::PartTime, Category::Other, true),
        job("2", "Baker", "Oslo", JobType::FullTime, Category::Other, true),
    ];

    for query in ["İz", "i̇z", "İZMİR", "iz", "zmi", "o"] {
        let filter = JobFilter {
            query: query.to_string(),
            ..JobFilter::default()
        };
        let matched = ids(&filter_jobs(&jobs, &filter));
        for job in &jobs {
            let highlighted =
                !highlight_ranges(&job.name, query).is_empty() || !highlight_ranges(&job.location, query).is_empty();
            assert_eq!(matched.contains(&job.id), highlighted, "query {query:?} on {}", job.id);
        }
    }

    assert_eq!(highlight_ranges("İzmir", "i̇z"), vec![(0, 2)]);
    assert_eq!(highlight_ranges("İzmir", "ZMI"), vec![(1, 4)]);
}
