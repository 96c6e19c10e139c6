// Applied-job tracking: plain CRUD over the applied_jobs table.

pub mod handlers;
