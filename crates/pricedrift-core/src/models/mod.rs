pub mod order;
pub mod record;
pub mod subscription;
