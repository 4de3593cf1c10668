/// One residue channel: n words modulo a single prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly<O>(pub Vec<O>);

impl<O> Poly<O>
where
    O: Default + Clone + Copy,
{
    pub fn new(n: usize) -> Self {
        Self(vec![O::default(); n])
    }

    pub fn n(&self) -> usize {
        self.0.len()
    }

    pub fn log_n(&self) -> usize {
        self.0.len().trailing_zeros() as usize
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.fill(*v)
    }

    pub fn zero(&mut self) {
        self.set_all(&O::default())
    }

    pub fn copy_from(&mut self, other: &Poly<O>) {
        self.0.resize(other.n(), O::default());
        self.0.copy_from_slice(&other.0)
    }
}

/// A residue-number-system polynomial: one [Poly] per prime, channel-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyRNS<O>(pub Vec<Poly<O>>);

impl<O> PolyRNS<O>
where
    O: Default + Clone + Copy,
{
    pub fn new(n: usize, level: usize) -> Self {
        Self((0..level + 1).map(|_| Poly::new(n)).collect())
    }

    pub fn n(&self) -> usize {
        self.0.first().map_or(0, |p| p.n())
    }

    pub fn log_n(&self) -> usize {
        self.0.first().map_or(0, |p| p.log_n())
    }

    pub fn level(&self) -> usize {
        self.0.len() - 1
    }

    pub fn at(&self, level: usize) -> &Poly<O> {
        assert!(
            level <= self.level(),
            "invalid argument level: level={} > self.level()={}",
            level,
            self.level()
        );
        &self.0[level]
    }

    pub fn at_mut(&mut self, level: usize) -> &mut Poly<O> {
        &mut self.0[level]
    }

    /// Returns the residues of coefficient `i` across all channels.
    pub fn column(&self, i: usize) -> Vec<O> {
        self.0.iter().map(|p| p.0[i]).collect()
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.iter_mut().for_each(|p| p.set_all(v))
    }

    pub fn zero(&mut self) {
        self.set_all(&O::default())
    }
}

impl<O> Default for PolyRNS<O> {
    fn default() -> Self {
        Self(Vec::new())
    }
}
