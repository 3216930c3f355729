mod adjacency;
mod log_view;
mod panels;
