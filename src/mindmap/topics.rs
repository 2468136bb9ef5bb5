//! Static fallback branch tables for mind-map generation
//!
//! When the generation endpoint is unavailable or returns an unusable
//! document, the mind map is built deterministically from these tables.
//! Unknown topics synthesize branches from the caller's subtopics, or
//! fall back to a fully generic template.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A primary branch with its secondary sub-points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub label: String,
    pub subs: Vec<String>,
}

impl Branch {
    /// Create a branch from string-ish parts
    pub fn new(label: impl Into<String>, subs: &[&str]) -> Self {
        Self { label: label.into(), subs: subs.iter().map(|s| s.to_string()).collect() }
    }
}

fn b(label: &str, subs: &[&str]) -> Branch {
    Branch::new(label, subs)
}

/// Curriculum topic table: 5 branches of 2-3 sub-points each
static TOPIC_BRANCHES: Lazy<HashMap<&'static str, Vec<Branch>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Physics
    map.insert(
        "Kinematics",
        vec![
            b("Motion Types", &["Uniform Motion", "Non-uniform", "Projectile"]),
            b("Equations", &["v = u + at", "s = ut + ½at²", "v² = u² + 2as"]),
            b("Graphs", &["s-t Graph", "v-t Graph", "a-t Graph"]),
            b("Projectile", &["Range = u²sin2θ/g", "Max Height", "Time of Flight"]),
            b("Relative Motion", &["v_AB = v_A - v_B", "River Crossing", "Rain Problems"]),
        ],
    );
    map.insert(
        "Laws of Motion",
        vec![
            b("Newton's 1st Law", &["Inertia", "Mass = resistance"]),
            b("Newton's 2nd Law", &["F = ma", "Momentum"]),
            b("Newton's 3rd Law", &["Action-Reaction", "Different bodies"]),
            b("Friction", &["f = μN", "Static vs Kinetic"]),
            b("Circular Motion", &["F = mv²/r", "Banking"]),
        ],
    );
    map.insert(
        "Work, Energy and Power",
        vec![
            b("Work", &["W = Fd cosθ", "Positive/Negative"]),
            b("Kinetic Energy", &["KE = ½mv²", "Work-Energy Theorem"]),
            b("Potential Energy", &["PE = mgh", "Spring PE = ½kx²"]),
            b("Conservation", &["KE + PE = constant", "Collisions"]),
            b("Power", &["P = W/t", "P = Fv"]),
        ],
    );
    map.insert(
        "Rotational Motion",
        vec![
            b("Angular Quantities", &["ω = dθ/dt", "α = dω/dt"]),
            b("Moment of Inertia", &["I = Σmr²", "Parallel Axis"]),
            b("Torque", &["τ = r × F", "τ = Iα"]),
            b("Angular Momentum", &["L = Iω", "Conservation"]),
            b("Rolling", &["v = Rω", "KE = ½mv² + ½Iω²"]),
        ],
    );

    // Chemistry
    map.insert(
        "Some Basic Concepts",
        vec![
            b("Matter", &["Solid/Liquid/Gas", "Element/Compound"]),
            b("Mole Concept", &["n = m/M", "Nₐ = 6.022×10²³"]),
            b("Stoichiometry", &["Balancing Equations", "Limiting Reagent"]),
            b("Atomic Mass", &["AMU", "Molecular Mass"]),
            b("Percentage Yield", &["Actual/Theoretical", "% Composition"]),
        ],
    );
    map.insert(
        "Atomic Structure",
        vec![
            b("Subatomic Particles", &["e⁻, p⁺, n⁰", "Discovery"]),
            b("Bohr's Model", &["E = -13.6/n² eV", "Orbits"]),
            b("Quantum Numbers", &["n, l, mₗ, mₛ", "Orbitals"]),
            b("Electronic Config", &["Aufbau", "Hund's Rule"]),
            b("Atomic Models", &["Thomson", "Rutherford", "Bohr"]),
        ],
    );
    map.insert(
        "Chemical Bonding",
        vec![
            b("Ionic Bonds", &["Electron Transfer", "NaCl Example"]),
            b("Covalent Bonds", &["Electron Sharing", "σ and π bonds"]),
            b("VSEPR Theory", &["Molecular Shapes", "Lone Pairs"]),
            b("Hybridization", &["sp³ Tetrahedral", "sp² Trigonal"]),
            b("Metallic Bonds", &["Electron Sea", "Conductivity"]),
        ],
    );
    map.insert(
        "Thermodynamics",
        vec![
            b("First Law", &["ΔU = q + w", "Energy Conservation"]),
            b("Enthalpy", &["ΔH = ΔU + PΔV", "Exo/Endothermic"]),
            b("Entropy", &["Disorder", "ΔS"]),
            b("Gibbs Energy", &["ΔG = ΔH - TΔS", "Spontaneity"]),
            b("Heat Capacity", &["Cp - Cv = R", "Specific Heat"]),
        ],
    );
    map.insert(
        "Equilibrium",
        vec![
            b("Dynamic Equilibrium", &["Forward = Backward", "Constant conc."]),
            b("Le Chatelier", &["Stress Response", "Shifts"]),
            b("Equilibrium Constant", &["Kc, Kp", "Relationship"]),
            b("Ionic Equilibrium", &["pH, pOH", "Buffer Solutions"]),
            b("Solubility", &["Ksp", "Common Ion Effect"]),
        ],
    );

    // Mathematics
    map.insert(
        "Sets and Functions",
        vec![
            b("Set Operations", &["Union ∪", "Intersection ∩", "Complement"]),
            b("Types of Sets", &["Empty ∅", "Finite", "Infinite"]),
            b("Functions", &["Domain", "Range", "Codomain"]),
            b("Types of Functions", &["One-One", "Onto", "Bijective"]),
            b("Inverse Functions", &["f⁻¹(x)", "Composition"]),
        ],
    );
    map.insert(
        "Trigonometry",
        vec![
            b("Ratios", &["sin, cos, tan", "cosec, sec, cot"]),
            b("Identities", &["sin²θ + cos²θ = 1", "Compound Angles"]),
            b("Standard Angles", &["0°, 30°, 45°, 60°, 90°"]),
            b("General Solutions", &["sin θ = sin α", "Periodicity"]),
            b("Double Angles", &["sin 2θ", "cos 2θ"]),
        ],
    );
    map.insert(
        "Algebra",
        vec![
            b("Complex Numbers", &["a + bi", "Argand Plane"]),
            b("Quadratic Equations", &["ax² + bx + c = 0", "Discriminant"]),
            b("Sequences", &["AP: a, a+d, a+2d", "GP: a, ar, ar²"]),
            b("Binomial Theorem", &["(a+b)ⁿ", "General Term"]),
            b("Permutations", &["nPr = n!/(n-r)!", "Combinations"]),
        ],
    );
    map.insert(
        "Calculus Introduction",
        vec![
            b("Limits", &["lim x→a f(x)", "L'Hôpital's Rule"]),
            b("Derivatives", &["dy/dx", "Chain Rule"]),
            b("Continuity", &["Left = Right limit", "Removable"]),
            b("Applications", &["Maxima/Minima", "Rate of Change"]),
            b("Integration", &["∫f(x)dx", "Fundamental Theorem"]),
        ],
    );
    map.insert(
        "Coordinate Geometry",
        vec![
            b("Straight Lines", &["y = mx + c", "Distance Formula"]),
            b("Circles", &["(x-h)² + (y-k)² = r²", "General Form"]),
            b("Parabola", &["y² = 4ax", "Focus, Directrix"]),
            b("Ellipse", &["x²/a² + y²/b² = 1", "Eccentricity"]),
            b("Hyperbola", &["x²/a² - y²/b² = 1", "Asymptotes"]),
        ],
    );

    // Biology
    map.insert(
        "Cell Biology",
        vec![
            b("Cell Theory", &["Basic unit", "Pre-existing cells"]),
            b("Cell Types", &["Prokaryotic", "Eukaryotic"]),
            b("Organelles", &["Nucleus", "Mitochondria", "Chloroplast"]),
            b("Cell Division", &["Mitosis", "Meiosis"]),
            b("Cell Cycle", &["G1, S, G2", "M Phase"]),
        ],
    );
    map.insert(
        "Plant Physiology",
        vec![
            b("Photosynthesis", &["Light Reactions", "Calvin Cycle"]),
            b("Transport", &["Xylem (water)", "Phloem (sugar)"]),
            b("Transpiration", &["Stomata", "Cohesion-Tension"]),
            b("Plant Hormones", &["Auxin", "Gibberellin", "Ethylene"]),
            b("Respiration", &["Glycolysis", "Krebs Cycle"]),
        ],
    );
    map.insert(
        "Genetics",
        vec![
            b("Mendel's Laws", &["Dominance", "Segregation", "Ind. Assortment"]),
            b("DNA Structure", &["Double Helix", "A-T, G-C"]),
            b("Central Dogma", &["DNA→RNA→Protein", "Transcription"]),
            b("Genetic Code", &["Codons", "Universal"]),
            b("Mutations", &["Point", "Frameshift", "Chromosomal"]),
        ],
    );
    map.insert(
        "Human Physiology",
        vec![
            b("Digestion", &["Enzymes", "Absorption"]),
            b("Circulation", &["Heart", "Blood Types"]),
            b("Respiration", &["Lungs", "Gas Exchange"]),
            b("Excretion", &["Nephron", "Urea Formation"]),
            b("Nervous System", &["Neurons", "Reflex Arc"]),
        ],
    );
    map.insert(
        "Ecology",
        vec![
            b("Ecosystem", &["Biotic", "Abiotic"]),
            b("Food Chain", &["Producers", "Consumers"]),
            b("Energy Flow", &["10% Rule", "Pyramids"]),
            b("Biodiversity", &["Species", "Genetic", "Ecosystem"]),
            b("Conservation", &["In-situ", "Ex-situ"]),
        ],
    );

    map
});

/// Generic template used when nothing better is available
fn generic_branches() -> Vec<Branch> {
    vec![
        b("Key Concepts", &["Definition", "Principles", "Laws"]),
        b("Formulas", &["Main Formula", "Derivations"]),
        b("Applications", &["Real World", "JEE Problems"]),
        b("Common Mistakes", &["Sign Errors", "Unit Confusion"]),
        b("Practice", &["Easy", "Medium", "Hard"]),
    ]
}

/// Synthesize branches from caller-supplied subtopics (at most six)
fn branches_from_subtopics(subtopics: &[String]) -> Vec<Branch> {
    subtopics
        .iter()
        .take(6)
        .map(|sub| b(sub, &["Key Points", "Examples", "Practice"]))
        .collect()
}

/// Resolve the fallback branch set for a topic
///
/// Known curriculum topics use their static table; unknown topics derive
/// branches from the supplied subtopics, or the generic template when no
/// subtopics were given either.
pub fn fallback_branches(topic: &str, subtopics: &[String]) -> Vec<Branch> {
    if let Some(branches) = TOPIC_BRANCHES.get(topic) {
        return branches.clone();
    }
    if !subtopics.is_empty() {
        return branches_from_subtopics(subtopics);
    }
    generic_branches()
}
