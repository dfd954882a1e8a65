mod task_worker;

pub use task_worker::TaskWorker;
