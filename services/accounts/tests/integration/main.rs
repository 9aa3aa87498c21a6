mod helpers;
mod verification_test;
