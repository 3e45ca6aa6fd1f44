mod analytics;
mod auth_gate;
mod emails;
mod health_check;
