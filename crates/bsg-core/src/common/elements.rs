//! Element symbols keyed by atomic number, used when labelling transitions.

pub const MAX_ATOMIC_NUMBER: usize = 118;

const ELEMENT_SYMBOLS: [&str; MAX_ATOMIC_NUMBER] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Symbol for `atomic_number`; `n` is returned for the free neutron (Z = 0).
pub fn element_symbol(atomic_number: i32) -> Option<&'static str> {
    match atomic_number {
        0 => Some("n"),
        1..=118 => Some(ELEMENT_SYMBOLS[(atomic_number - 1) as usize]),
        _ => None,
    }
}

/// Nuclide label such as `60Co`, falling back to `Z=<z>` for unknown elements.
pub fn nuclide_label(atomic_number: i32, mass_number: i32) -> String {
    match element_symbol(atomic_number) {
        Some(symbol) => format!("{mass_number}{symbol}"),
        None => format!("{mass_number}(Z={atomic_number})"),
    }
}
