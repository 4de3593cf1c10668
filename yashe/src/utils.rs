use math::{Polynomial, Result, State};

/// [a * b] mod (x^nphi - 1, Q). `b` may already be in [State::Transform].
pub(crate) fn mul_reduce(a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
    let mut a: Polynomial = a.clone();
    a.to_state(State::Transform);
    let mut c: Polynomial = if b.state() == State::Transform {
        a.mul_inplace(b)?;
        a
    } else {
        let mut b: Polynomial = b.clone();
        b.to_state(State::Transform);
        a.mul(&b)?
    };
    c.to_state(State::Coefficient);
    c.reduce()?;
    Ok(c)
}

/// Returns a copy in [State::Transform], ready to be multiplied.
pub(crate) fn prepare(a: &Polynomial) -> Polynomial {
    let mut a: Polynomial = a.clone();
    a.to_state(State::Transform);
    a
}
