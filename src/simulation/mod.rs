pub mod random_model;
