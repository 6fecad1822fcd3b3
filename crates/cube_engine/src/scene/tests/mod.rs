//! Scene-level scenario and statistical tests
