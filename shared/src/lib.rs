use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Non-negative currency amount stored as integer hundredths.
///
/// Totals are summed in integer space so repeated edits never drift the way
/// floating-point accumulation does. On the wire the value is a plain JSON
/// number in units, matching the document service's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_hundredths(hundredths: i64) -> Money {
        Money(hundredths)
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    /// Parse a user-entered amount: a non-negative decimal with at most two
    /// fraction digits. Whitespace around the value is ignored.
    pub fn parse(input: &str) -> Result<Money, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyParseError::Invalid(trimmed.to_string()));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyParseError::Invalid(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::Invalid(trimmed.to_string()))?;
        let fraction_hundredths: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let hundredths = whole
            .checked_mul(100)
            .and_then(|h| h.checked_add(fraction_hundredths))
            .ok_or_else(|| MoneyParseError::Invalid(trimmed.to_string()))?;

        if negative {
            return Err(MoneyParseError::Negative);
        }

        Ok(Money(hundredths))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}", self.0 / 100)
        } else {
            write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Ok(Money((units * 100.0).round() as i64))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoneyParseError {
    Empty,
    Invalid(String),
    Negative,
    TooPrecise,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is required"),
            MoneyParseError::Invalid(input) => write!(f, "'{}' is not a valid amount", input),
            MoneyParseError::Negative => write!(f, "Amount must not be negative"),
            MoneyParseError::TooPrecise => write!(f, "Amount has more than two decimal places"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// Request number in format: "LPJ-<epoch_millis>-<entropy>"
///
/// Time plus an entropy suffix keeps rapid regenerations distinct with high
/// probability. The caller supplies both so the function stays pure.
pub fn generate_request_number(epoch_millis: u64, entropy: u32) -> String {
    format!("LPJ-{}-{:04}", epoch_millis, entropy % 10_000)
}

/// One expense row pairing a PUM entry with its LPJ counterpart.
///
/// Amounts are kept exactly as typed; `pum_or_zero`/`lpj_or_zero` read them
/// for the running totals, treating anything unparseable as zero the same way
/// the form treats a cleared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RincianDraft {
    /// Stable render/removal key, unique within the draft
    pub id: u32,
    pub deskripsi_pum: String,
    /// Raw amount input for the PUM column
    pub jumlah_pum: String,
    pub deskripsi_lpj: String,
    /// Raw amount input for the LPJ column
    pub jumlah_lpj: String,
}

impl RincianDraft {
    fn blank(id: u32) -> RincianDraft {
        RincianDraft {
            id,
            deskripsi_pum: String::new(),
            jumlah_pum: "0".to_string(),
            deskripsi_lpj: String::new(),
            jumlah_lpj: "0".to_string(),
        }
    }

    pub fn pum_or_zero(&self) -> Money {
        Money::parse(&self.jumlah_pum).unwrap_or(Money::ZERO)
    }

    pub fn lpj_or_zero(&self) -> Money {
        Money::parse(&self.jumlah_lpj).unwrap_or(Money::ZERO)
    }
}

/// The in-progress LPJ form session.
///
/// Invariants: `rincian_items` is never empty, row ids are strictly
/// increasing for the life of the draft, and the two totals always equal the
/// exact sum of the corresponding column.
#[derive(Debug, Clone, PartialEq)]
pub struct LpjDraft {
    /// Read-only on the form; regenerated on reset and while idle
    pub no_request: String,
    pub nama_pemohon: String,
    pub jabatan: String,
    pub nama_departemen: String,
    pub kode_departemen: String,
    pub uraian: String,
    pub nama_jenis: String,
    /// Requested amount, kept as a free-form string on the wire
    pub jml_request: String,
    /// Requested amount spelled out in words
    pub jml_terbilang: String,
    pub nama_approve_vpkeu: String,
    pub nama_approve_vptre: String,
    pub nama_approve_vp: String,
    /// Document date (YYYY-MM-DD), prefilled with today
    pub tgl_lpj: String,
    pub rincian_items: Vec<RincianDraft>,
    pub total_pum: Money,
    pub total_lpj: Money,
    next_item_id: u32,
    edited: bool,
}

impl LpjDraft {
    pub fn new(no_request: String, tgl_lpj: String) -> LpjDraft {
        LpjDraft {
            no_request,
            nama_pemohon: String::new(),
            jabatan: String::new(),
            nama_departemen: String::new(),
            kode_departemen: String::new(),
            uraian: String::new(),
            nama_jenis: String::new(),
            jml_request: String::new(),
            jml_terbilang: String::new(),
            nama_approve_vpkeu: String::new(),
            nama_approve_vptre: String::new(),
            nama_approve_vp: String::new(),
            tgl_lpj,
            rincian_items: vec![RincianDraft::blank(1)],
            total_pum: Money::ZERO,
            total_lpj: Money::ZERO,
            next_item_id: 2,
            edited: false,
        }
    }

    /// Whether the user has changed anything since the draft was created.
    /// Regenerating the request number does not count.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Swap in a regenerated request number without marking the draft edited.
    pub fn replace_request_number(&mut self, no_request: String) {
        self.no_request = no_request;
    }

    /// Append a blank row with the next id from the monotonic counter.
    pub fn add_row(&mut self) {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.rincian_items.push(RincianDraft::blank(id));
        self.edited = true;
        self.recompute_totals();
    }

    /// Remove the row at `index`. Returns false without mutating when only
    /// one row remains or the index is out of range.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rincian_items.len() <= 1 || index >= self.rincian_items.len() {
            return false;
        }
        self.rincian_items.remove(index);
        self.edited = true;
        self.recompute_totals();
        true
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: String) {
        field.set(self, value);
        self.edited = true;
    }

    pub fn set_item_field(&mut self, index: usize, field: RincianField, value: String) {
        let Some(item) = self.rincian_items.get_mut(index) else {
            return;
        };
        self.edited = true;
        match field {
            RincianField::DeskripsiPum => item.deskripsi_pum = value,
            RincianField::DeskripsiLpj => item.deskripsi_lpj = value,
            RincianField::JumlahPum => {
                item.jumlah_pum = value;
                self.recompute_totals();
            }
            RincianField::JumlahLpj => {
                item.jumlah_lpj = value;
                self.recompute_totals();
            }
        }
    }

    fn recompute_totals(&mut self) {
        self.total_pum = self.rincian_items.iter().map(RincianDraft::pum_or_zero).sum();
        self.total_lpj = self.rincian_items.iter().map(RincianDraft::lpj_or_zero).sum();
    }

    /// Field-local validation: an empty map means the draft can be submitted.
    /// Keys are field paths (`nama_pemohon`, `rincianItems[0].jumlah_pum`).
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        for field in ScalarField::ALL {
            if field.get(self).trim().is_empty() {
                errors.insert(
                    field.name().to_string(),
                    format!("{} is required", field.label()),
                );
            }
        }

        for (index, item) in self.rincian_items.iter().enumerate() {
            if item.deskripsi_pum.trim().is_empty() {
                errors.insert(
                    RincianField::DeskripsiPum.path(index),
                    "Deskripsi PUM is required".to_string(),
                );
            }
            if item.deskripsi_lpj.trim().is_empty() {
                errors.insert(
                    RincianField::DeskripsiLpj.path(index),
                    "Deskripsi LPJ is required".to_string(),
                );
            }
            if let Some(message) = amount_error("Jumlah PUM", &item.jumlah_pum) {
                errors.insert(RincianField::JumlahPum.path(index), message);
            }
            if let Some(message) = amount_error("Jumlah LPJ", &item.jumlah_lpj) {
                errors.insert(RincianField::JumlahLpj.path(index), message);
            }
        }

        errors
    }

    /// Assemble the wire payload: 1-based `no` per row, totals recomputed
    /// from the parsed row amounts.
    pub fn to_request(&self) -> GenerateLpjRequest {
        let rincian_items: Vec<RincianLine> = self
            .rincian_items
            .iter()
            .enumerate()
            .map(|(index, item)| RincianLine {
                no: index as u32 + 1,
                deskripsi_pum: item.deskripsi_pum.clone(),
                jumlah_pum: item.pum_or_zero(),
                deskripsi_lpj: item.deskripsi_lpj.clone(),
                jumlah_lpj: item.lpj_or_zero(),
            })
            .collect();

        let total_pum = rincian_items.iter().map(|line| line.jumlah_pum).sum();
        let total_lpj = rincian_items.iter().map(|line| line.jumlah_lpj).sum();

        GenerateLpjRequest {
            no_request: self.no_request.clone(),
            nama_pemohon: self.nama_pemohon.clone(),
            jabatan: self.jabatan.clone(),
            nama_departemen: self.nama_departemen.clone(),
            kode_departemen: self.kode_departemen.clone(),
            uraian: self.uraian.clone(),
            nama_jenis: self.nama_jenis.clone(),
            jml_request: self.jml_request.clone(),
            jml_terbilang: self.jml_terbilang.clone(),
            nama_approve_vpkeu: self.nama_approve_vpkeu.clone(),
            nama_approve_vptre: self.nama_approve_vptre.clone(),
            nama_approve_vp: self.nama_approve_vp.clone(),
            tgl_lpj: self.tgl_lpj.clone(),
            rincian_items,
            total_pum,
            total_lpj,
        }
    }
}

fn amount_error(label: &str, input: &str) -> Option<String> {
    match Money::parse(input) {
        Ok(_) => None,
        Err(MoneyParseError::Empty) => Some(format!("{} is required", label)),
        Err(MoneyParseError::Negative) => Some(format!("{} must be positive", label)),
        Err(MoneyParseError::TooPrecise) => {
            Some(format!("{} has too many decimal places", label))
        }
        Err(MoneyParseError::Invalid(_)) => Some(format!("{} must be a number", label)),
    }
}

/// The editable scalar fields of the form, in render order.
///
/// The form iterates `ALL` to build the field grid and validation walks the
/// same table, so adding a field here is the single change needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    NamaPemohon,
    Jabatan,
    NamaDepartemen,
    KodeDepartemen,
    Uraian,
    NamaJenis,
    JmlRequest,
    JmlTerbilang,
    NamaApproveVpkeu,
    NamaApproveVptre,
    NamaApproveVp,
    TglLpj,
}

impl ScalarField {
    pub const ALL: [ScalarField; 12] = [
        ScalarField::NamaPemohon,
        ScalarField::Jabatan,
        ScalarField::NamaDepartemen,
        ScalarField::KodeDepartemen,
        ScalarField::Uraian,
        ScalarField::NamaJenis,
        ScalarField::JmlRequest,
        ScalarField::JmlTerbilang,
        ScalarField::NamaApproveVpkeu,
        ScalarField::NamaApproveVptre,
        ScalarField::NamaApproveVp,
        ScalarField::TglLpj,
    ];

    /// Wire name, also used as the field's error-map path.
    pub fn name(self) -> &'static str {
        match self {
            ScalarField::NamaPemohon => "nama_pemohon",
            ScalarField::Jabatan => "jabatan",
            ScalarField::NamaDepartemen => "nama_departemen",
            ScalarField::KodeDepartemen => "kode_departemen",
            ScalarField::Uraian => "uraian",
            ScalarField::NamaJenis => "nama_jenis",
            ScalarField::JmlRequest => "jml_request",
            ScalarField::JmlTerbilang => "jml_terbilang",
            ScalarField::NamaApproveVpkeu => "nama_approve_vpkeu",
            ScalarField::NamaApproveVptre => "nama_approve_vptre",
            ScalarField::NamaApproveVp => "nama_approve_vp",
            ScalarField::TglLpj => "tgl_lpj",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScalarField::NamaPemohon => "Nama Pemohon",
            ScalarField::Jabatan => "Jabatan",
            ScalarField::NamaDepartemen => "Nama Departemen",
            ScalarField::KodeDepartemen => "Kode Departemen",
            ScalarField::Uraian => "Uraian",
            ScalarField::NamaJenis => "Nama Jenis",
            ScalarField::JmlRequest => "Jumlah Request",
            ScalarField::JmlTerbilang => "Jumlah Terbilang",
            ScalarField::NamaApproveVpkeu => "Nama Approve VP Keuangan",
            ScalarField::NamaApproveVptre => "Nama Approve VP TRE",
            ScalarField::NamaApproveVp => "Nama Approve VP",
            ScalarField::TglLpj => "Tanggal LPJ",
        }
    }

    /// HTML input type for the field
    pub fn input_type(self) -> &'static str {
        match self {
            ScalarField::TglLpj => "date",
            _ => "text",
        }
    }

    pub fn get(self, draft: &LpjDraft) -> &str {
        match self {
            ScalarField::NamaPemohon => &draft.nama_pemohon,
            ScalarField::Jabatan => &draft.jabatan,
            ScalarField::NamaDepartemen => &draft.nama_departemen,
            ScalarField::KodeDepartemen => &draft.kode_departemen,
            ScalarField::Uraian => &draft.uraian,
            ScalarField::NamaJenis => &draft.nama_jenis,
            ScalarField::JmlRequest => &draft.jml_request,
            ScalarField::JmlTerbilang => &draft.jml_terbilang,
            ScalarField::NamaApproveVpkeu => &draft.nama_approve_vpkeu,
            ScalarField::NamaApproveVptre => &draft.nama_approve_vptre,
            ScalarField::NamaApproveVp => &draft.nama_approve_vp,
            ScalarField::TglLpj => &draft.tgl_lpj,
        }
    }

    fn set(self, draft: &mut LpjDraft, value: String) {
        match self {
            ScalarField::NamaPemohon => draft.nama_pemohon = value,
            ScalarField::Jabatan => draft.jabatan = value,
            ScalarField::NamaDepartemen => draft.nama_departemen = value,
            ScalarField::KodeDepartemen => draft.kode_departemen = value,
            ScalarField::Uraian => draft.uraian = value,
            ScalarField::NamaJenis => draft.nama_jenis = value,
            ScalarField::JmlRequest => draft.jml_request = value,
            ScalarField::JmlTerbilang => draft.jml_terbilang = value,
            ScalarField::NamaApproveVpkeu => draft.nama_approve_vpkeu = value,
            ScalarField::NamaApproveVptre => draft.nama_approve_vptre = value,
            ScalarField::NamaApproveVp => draft.nama_approve_vp = value,
            ScalarField::TglLpj => draft.tgl_lpj = value,
        }
    }
}

/// The per-row fields of a rincian line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RincianField {
    DeskripsiPum,
    JumlahPum,
    DeskripsiLpj,
    JumlahLpj,
}

impl RincianField {
    pub fn name(self) -> &'static str {
        match self {
            RincianField::DeskripsiPum => "deskripsi_pum",
            RincianField::JumlahPum => "jumlah_pum",
            RincianField::DeskripsiLpj => "deskripsi_lpj",
            RincianField::JumlahLpj => "jumlah_lpj",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RincianField::DeskripsiPum => "Deskripsi PUM",
            RincianField::JumlahPum => "Jumlah PUM",
            RincianField::DeskripsiLpj => "Deskripsi LPJ",
            RincianField::JumlahLpj => "Jumlah LPJ",
        }
    }

    /// Error-map path for this field on row `index`
    pub fn path(self, index: usize) -> String {
        format!("rincianItems[{}].{}", index, self.name())
    }
}

/// Wire payload for `POST {base}/generate-lpj`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateLpjRequest {
    pub no_request: String,
    pub nama_pemohon: String,
    pub jabatan: String,
    pub nama_departemen: String,
    pub kode_departemen: String,
    pub uraian: String,
    pub nama_jenis: String,
    pub jml_request: String,
    pub jml_terbilang: String,
    pub nama_approve_vpkeu: String,
    pub nama_approve_vptre: String,
    pub nama_approve_vp: String,
    pub tgl_lpj: String,
    #[serde(rename = "rincianItems")]
    pub rincian_items: Vec<RincianLine>,
    pub total_pum: Money,
    pub total_lpj: Money,
}

/// One row of the wire payload, numbered 1-based in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RincianLine {
    pub no: u32,
    pub deskripsi_pum: String,
    pub jumlah_pum: Money,
    pub deskripsi_lpj: String,
    pub jumlah_lpj: Money,
}

/// A previously generated document as reported by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpjHistoryItem {
    pub id: i64,
    pub no_request: String,
    /// Document date as stored by the backend
    pub tgl_lpj: String,
    /// Server-side path of the rendered PDF
    pub file_path: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl LpjHistoryItem {
    /// Attachment name for the download endpoint: the last path segment.
    pub fn filename(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(self.file_path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> LpjDraft {
        let mut draft = LpjDraft::new(
            generate_request_number(1702516122000, 42),
            "2025-01-15".to_string(),
        );
        for field in ScalarField::ALL {
            if field != ScalarField::TglLpj {
                draft.set_scalar(field, format!("{} value", field.label()));
            }
        }
        draft.set_item_field(0, RincianField::DeskripsiPum, "taxi".to_string());
        draft.set_item_field(0, RincianField::JumlahPum, "50".to_string());
        draft.set_item_field(0, RincianField::DeskripsiLpj, "taxi".to_string());
        draft.set_item_field(0, RincianField::JumlahLpj, "45".to_string());
        draft
    }

    #[test]
    fn test_money_parse_whole_and_fractional() {
        assert_eq!(Money::parse("50").unwrap(), Money::from_hundredths(5000));
        assert_eq!(Money::parse("50.25").unwrap(), Money::from_hundredths(5025));
        assert_eq!(Money::parse("0.5").unwrap(), Money::from_hundredths(50));
        assert_eq!(Money::parse("0").unwrap(), Money::ZERO);
        assert_eq!(Money::parse(" 7 ").unwrap(), Money::from_hundredths(700));
    }

    #[test]
    fn test_money_parse_rejections() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("-5"), Err(MoneyParseError::Negative));
        assert_eq!(Money::parse("1.234"), Err(MoneyParseError::TooPrecise));
        assert!(matches!(Money::parse("abc"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse(".5"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::Invalid(_))));
    }

    #[test]
    fn test_money_sum_is_exact() {
        // 0.1 + 0.2 drifts in floating point; hundredths must not
        let amounts = ["0.1", "0.2"];
        let total: Money = amounts.iter().map(|a| Money::parse(a).unwrap()).sum();
        assert_eq!(total, Money::parse("0.3").unwrap());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::parse("50").unwrap().to_string(), "50");
        assert_eq!(Money::parse("50.25").unwrap().to_string(), "50.25");
        assert_eq!(Money::parse("50.20").unwrap().to_string(), "50.20");
        assert_eq!(Money::ZERO.to_string(), "0");
    }

    #[test]
    fn test_generate_request_number() {
        let first = generate_request_number(1702516122000, 17);
        assert_eq!(first, "LPJ-1702516122000-0017");

        // Same instant, different entropy still differs
        let second = generate_request_number(1702516122000, 18);
        assert_ne!(first, second);
    }

    #[test]
    fn test_new_draft_starts_with_one_blank_row() {
        let draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        assert_eq!(draft.rincian_items.len(), 1);
        assert_eq!(draft.rincian_items[0].id, 1);
        assert_eq!(draft.total_pum, Money::ZERO);
        assert_eq!(draft.total_lpj, Money::ZERO);
        assert!(!draft.is_edited());
    }

    #[test]
    fn test_totals_follow_every_edit() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());

        draft.set_item_field(0, RincianField::JumlahPum, "10.50".to_string());
        assert_eq!(draft.total_pum, Money::parse("10.50").unwrap());

        draft.add_row();
        draft.set_item_field(1, RincianField::JumlahPum, "4.50".to_string());
        assert_eq!(draft.total_pum, Money::parse("15").unwrap());

        draft.set_item_field(1, RincianField::JumlahLpj, "3".to_string());
        assert_eq!(draft.total_lpj, Money::parse("3").unwrap());

        // Overwriting a row uses the new value, not the stale one
        draft.set_item_field(0, RincianField::JumlahPum, "1".to_string());
        assert_eq!(draft.total_pum, Money::parse("5.50").unwrap());

        assert!(draft.remove_row(1));
        assert_eq!(draft.total_pum, Money::parse("1").unwrap());
        assert_eq!(draft.total_lpj, Money::ZERO);
    }

    #[test]
    fn test_unparseable_amount_counts_as_zero_in_totals() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        draft.set_item_field(0, RincianField::JumlahPum, "12".to_string());
        draft.add_row();
        draft.set_item_field(1, RincianField::JumlahPum, "not a number".to_string());
        assert_eq!(draft.total_pum, Money::parse("12").unwrap());
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        assert!(!draft.remove_row(0));
        assert_eq!(draft.rincian_items.len(), 1);

        draft.add_row();
        assert!(draft.remove_row(0));
        assert!(!draft.remove_row(0));
        assert_eq!(draft.rincian_items.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        draft.add_row();
        assert!(!draft.remove_row(5));
        assert_eq!(draft.rincian_items.len(), 2);
    }

    #[test]
    fn test_row_ids_strictly_increase_across_removals() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        draft.add_row();
        draft.add_row();
        assert_eq!(
            draft.rincian_items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        // Ids are never reused after removals
        draft.remove_row(2);
        draft.remove_row(1);
        draft.add_row();
        assert_eq!(
            draft.rincian_items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![1, 4]
        );
    }

    #[test]
    fn test_validate_blank_draft() {
        let draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        let errors = draft.validate();

        assert_eq!(
            errors.get("nama_pemohon").map(String::as_str),
            Some("Nama Pemohon is required")
        );
        assert_eq!(
            errors.get("rincianItems[0].deskripsi_pum").map(String::as_str),
            Some("Deskripsi PUM is required")
        );
        // The request number and the prefilled date are not flagged
        assert!(!errors.contains_key("no_request"));
        assert!(!errors.contains_key("tgl_lpj"));
        // Fresh rows carry a zero amount, which is valid
        assert!(!errors.contains_key("rincianItems[0].jumlah_pum"));
    }

    #[test]
    fn test_validate_amount_rules() {
        let mut draft = filled_draft();
        draft.set_item_field(0, RincianField::JumlahPum, String::new());
        draft.set_item_field(0, RincianField::JumlahLpj, "-3".to_string());
        draft.add_row();
        draft.set_item_field(1, RincianField::DeskripsiPum, "hotel".to_string());
        draft.set_item_field(1, RincianField::DeskripsiLpj, "hotel".to_string());
        draft.set_item_field(1, RincianField::JumlahPum, "12x".to_string());
        draft.set_item_field(1, RincianField::JumlahLpj, "1.005".to_string());

        let errors = draft.validate();
        assert_eq!(
            errors.get("rincianItems[0].jumlah_pum").map(String::as_str),
            Some("Jumlah PUM is required")
        );
        assert_eq!(
            errors.get("rincianItems[0].jumlah_lpj").map(String::as_str),
            Some("Jumlah LPJ must be positive")
        );
        assert_eq!(
            errors.get("rincianItems[1].jumlah_pum").map(String::as_str),
            Some("Jumlah PUM must be a number")
        );
        assert_eq!(
            errors.get("rincianItems[1].jumlah_lpj").map(String::as_str),
            Some("Jumlah LPJ has too many decimal places")
        );
    }

    #[test]
    fn test_validate_filled_draft_is_clean() {
        let draft = filled_draft();
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_edited_flag() {
        let mut draft = LpjDraft::new("LPJ-1-0001".to_string(), "2025-01-15".to_string());
        assert!(!draft.is_edited());

        // A silent regeneration does not mark the draft edited
        draft.replace_request_number("LPJ-2-0002".to_string());
        assert!(!draft.is_edited());
        assert_eq!(draft.no_request, "LPJ-2-0002");

        draft.set_scalar(ScalarField::NamaPemohon, "Budi".to_string());
        assert!(draft.is_edited());
    }

    #[test]
    fn test_payload_numbers_rows_and_totals() {
        let draft = filled_draft();
        let request = draft.to_request();

        assert_eq!(request.rincian_items[0].no, 1);
        assert_eq!(request.total_pum, Money::parse("50").unwrap());
        assert_eq!(request.total_lpj, Money::parse("45").unwrap());
    }

    #[test]
    fn test_payload_wire_names() {
        let value = serde_json::to_value(filled_draft().to_request()).unwrap();

        assert_eq!(value["rincianItems"][0]["no"], 1);
        assert_eq!(value["rincianItems"][0]["jumlah_pum"], 50);
        assert_eq!(value["rincianItems"][0]["deskripsi_lpj"], "taxi");
        assert_eq!(value["total_pum"], 50);
        assert_eq!(value["total_lpj"], 45);
        assert!(value.get("nama_pemohon").is_some());
        assert!(value.get("nama_approve_vptre").is_some());
        assert!(value.get("rincian_items").is_none());
    }

    #[test]
    fn test_payload_renumbers_after_removal() {
        let mut draft = filled_draft();
        draft.add_row();
        draft.set_item_field(1, RincianField::DeskripsiPum, "hotel".to_string());
        draft.set_item_field(1, RincianField::JumlahPum, "100".to_string());
        draft.remove_row(0);

        let request = draft.to_request();
        assert_eq!(request.rincian_items.len(), 1);
        // The surviving row is renumbered from 1 regardless of its id
        assert_eq!(request.rincian_items[0].no, 1);
        assert_eq!(request.rincian_items[0].deskripsi_pum, "hotel");
    }

    #[test]
    fn test_history_item_filename() {
        let item = LpjHistoryItem {
            id: 1,
            no_request: "LPJ-1702516122000-0042".to_string(),
            tgl_lpj: "2025-01-15".to_string(),
            file_path: "output/lpj/LPJ_PUM_42.pdf".to_string(),
            created_at: "2025-01-15T10:00:00Z".to_string(),
        };
        assert_eq!(item.filename(), "LPJ_PUM_42.pdf");

        let bare = LpjHistoryItem {
            file_path: "LPJ_PUM_43.pdf".to_string(),
            ..item
        };
        assert_eq!(bare.filename(), "LPJ_PUM_43.pdf");
    }

    #[test]
    fn test_history_item_deserializes_from_backend_shape() {
        let json = r#"{
            "id": 7,
            "no_request": "LPJ-1702516122000-0042",
            "tgl_lpj": "2025-01-15",
            "file_path": "output/LPJ_PUM_7.pdf",
            "created_at": "2025-01-15T10:00:00Z"
        }"#;
        let item: LpjHistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.filename(), "LPJ_PUM_7.pdf");
    }
}
