pub mod applied_job;
