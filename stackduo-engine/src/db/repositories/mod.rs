mod dataset_repository;
mod report_repository;

pub use dataset_repository::DatasetRepository;
pub use report_repository::ReportRepository;
