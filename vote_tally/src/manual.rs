/*!

This is the long-form manual for `vote_tally` and `tally`.

## Input format

The input is a text file with one polling station per line. The fields are separated
by `;` and are not quoted: a field ends at the next `;`, whatever it contains.
The first line is a header and is always skipped. Blank lines are ignored everywhere,
including before the header: `headerLines` counts non-blank lines.

The files are often encoded in Latin-1 rather than UTF-8. Bytes that are not valid
UTF-8 are replaced by the character U+FFFD (`Ardèche` becomes `Ard�che`), and the
line is still counted.

With the default layout (the per-polling-station results published for the French
presidential election), the columns are:

| column (0-based)        | content                                |
|-------------------------|----------------------------------------|
| 0                       | code of the department                 |
| 1                       | name of the department (district)      |
| 10                      | number of votes cast at this station   |
| 23, 30, 37, ...         | name of a candidate                    |
| 25, 32, 39, ...         | number of votes for that candidate     |

Every line must have at least 24 fields. Shorter lines are reported and skipped.
Candidate groups are read every 7 columns for as long as the line has a vote column
for the group.

Numbers that cannot be read do not stop the tabulation:
- an unreadable total counts as 0 for the station, but the candidates of the station
  are still counted
- an unreadable candidate count removes that candidate from the station (it is not
  counted as 0)

## Configuration

The layout can be changed with a JSON file passed with `--config`:

```json
{
  "inputFile": "resultats.txt",
  "delimiter": ";",
  "headerLines": 1,
  "districtColumnIndex": 1,
  "totalVotesColumnIndex": 10,
  "firstCandidateColumnIndex": 23,
  "candidateColumnStride": 7,
  "candidateVotesOffset": 2
}
```

All the keys are optional.

## Output

```text
Nombre de votes : 150
Candidat : DUPONT Nombre de votes : 80
Département : 75 Candidat : DUPONT Nombre de votes : 80
# 1 : 75
```

Candidates are listed by name (or by decreasing number of votes with `--order votes`).
Districts are ranked by decreasing number of votes; districts with the same number
of votes are listed by name.

This is different from the historical program, which listed candidates in no
particular order.

## Checking the output

`--reference <file>` compares the report with the content of a file and fails
when they differ. The differences are printed.
*/
