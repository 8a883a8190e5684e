mod helpers;
mod signup;
mod two_factor;
